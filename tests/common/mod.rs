use hedwig_astro::coords::{CoordSystem, SkyCoord};
use hedwig_astro::targets::TargetObject;

pub fn icrs_object(name: &str, ra_deg: f64, dec_deg: f64) -> TargetObject {
    TargetObject::new(
        name,
        CoordSystem::Icrs,
        SkyCoord::from_degrees(CoordSystem::Icrs, ra_deg, dec_deg).unwrap(),
    )
}
