//! # Coordinate engine
//!
//! Canonical representation of a celestial position ([`SkyCoord`]), parsing
//! of user-entered coordinate strings, conversion between the supported
//! systems and formatting for display.
//!
//! A [`SkyCoord`] is tied to the reference frame it was entered in; frame
//! changes go through fixed 3×3 rotation matrices applied to the unit
//! vector, with `x₂ = rot · x₁` where `x₁` is a vector in the source frame
//! and `x₂` the same vector in the target frame.

mod format;
mod parse;
pub mod system;

pub use format::{format_coord, format_coord_all_systems, CoordAllSystem};
pub use parse::parse_coord;
pub use system::{AngleUnit, CoordSystem, SystemInfo};

use nalgebra::{Matrix3, Matrix3xX, Vector3};
use serde::Serialize;

use crate::constants::{Degree, Radian, DPI, RADEG};
use crate::hedwig_errors::HedwigError;
use crate::targets::TargetObject;

/// Rotation from ICRS to Galactic coordinates (Hipparcos-derived matrix,
/// identical to the one used by the astropy frame graph).
const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [
        -0.054_875_560_416_215_4,
        -0.873_437_090_234_885_0,
        -0.483_835_015_548_713_2,
    ],
    [
        0.494_109_427_875_583_7,
        -0.444_829_629_960_011_2,
        0.746_982_244_497_218_9,
    ],
    [
        -0.867_666_149_019_004_7,
        -0.198_076_373_431_201_5,
        0.455_983_776_175_066_9,
    ],
];

fn icrs_to_galactic() -> Matrix3<f64> {
    Matrix3::from_fn(|r, c| ICRS_TO_GALACTIC[r][c])
}

/// Rotation matrix taking unit vectors from `from` to `to`.
fn rotation(from: CoordSystem, to: CoordSystem) -> Matrix3<f64> {
    match (from, to) {
        (CoordSystem::Icrs, CoordSystem::Galactic) => icrs_to_galactic(),
        (CoordSystem::Galactic, CoordSystem::Icrs) => icrs_to_galactic().transpose(),
        _ => Matrix3::identity(),
    }
}

/// Canonical celestial position: a longitude/latitude pair in radians tied
/// to the coordinate system it was constructed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyCoord {
    system: CoordSystem,
    lon: Radian,
    lat: Radian,
}

impl SkyCoord {
    /// Build a coordinate from degrees, normalizing the longitude to
    /// [0, 360) and rejecting latitudes outside ±90.
    pub fn from_degrees(
        system: CoordSystem,
        lon: Degree,
        lat: Degree,
    ) -> Result<SkyCoord, HedwigError> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > 90.0 {
            return Err(HedwigError::LatitudeOutOfRange(lat));
        }
        let lon = (lon % 360.0 + 360.0) % 360.0;
        Ok(SkyCoord {
            system,
            lon: lon * RADEG,
            lat: lat * RADEG,
        })
    }

    pub(crate) fn from_radians_unchecked(system: CoordSystem, lon: Radian, lat: Radian) -> SkyCoord {
        SkyCoord { system, lon, lat }
    }

    pub fn system(&self) -> CoordSystem {
        self.system
    }

    pub fn lon_rad(&self) -> Radian {
        self.lon
    }

    pub fn lat_rad(&self) -> Radian {
        self.lat
    }

    pub fn lon_deg(&self) -> Degree {
        self.lon / RADEG
    }

    pub fn lat_deg(&self) -> Degree {
        self.lat / RADEG
    }

    /// Cartesian unit vector in the coordinate's own frame.
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        Vector3::new(cos_lon * cos_lat, sin_lon * cos_lat, sin_lat)
    }

    fn from_unit_vector(system: CoordSystem, v: Vector3<f64>) -> SkyCoord {
        let lat = v.z.clamp(-1.0, 1.0).asin();
        let mut lon = v.y.atan2(v.x);
        if lon < 0.0 {
            lon += DPI;
        }
        SkyCoord { system, lon, lat }
    }

    /// Express this position in another coordinate system.
    pub fn to_system(&self, system: CoordSystem) -> SkyCoord {
        if system == self.system {
            return *self;
        }
        let rotated = rotation(self.system, system) * self.unit_vector();
        SkyCoord::from_unit_vector(system, rotated)
    }
}

/// Flatten a coordinate to a pair of decimal degrees in its own frame, for
/// persistence or transmission without re-parsing user strings.
pub fn coord_to_dec_deg(coord: &SkyCoord) -> (Degree, Degree) {
    (coord.lon_deg(), coord.lat_deg())
}

/// Rebuild a coordinate from a pair of decimal degrees previously produced
/// by [`coord_to_dec_deg`].
pub fn coord_from_dec_deg(
    system: CoordSystem,
    x: Degree,
    y: Degree,
) -> Result<SkyCoord, HedwigError> {
    SkyCoord::from_degrees(system, x, y)
}

/// A batched set of positions, all expressed in ICRS, for vectorized
/// downstream processing.
///
/// Converting many coordinates one by one is far slower than rotating them
/// as the columns of a single matrix product; the availability engine in
/// particular evaluates every target at every time sample from one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordBatch {
    lon: Vec<Radian>,
    lat: Vec<Radian>,
}

impl CoordBatch {
    /// Concatenate the coordinates of the given targets, rotating each
    /// non-equatorial frame group into ICRS with one matrix product.
    pub fn concat_icrs(objects: &[TargetObject]) -> CoordBatch {
        let n = objects.len();
        let mut vecs = Matrix3xX::<f64>::zeros(n);
        for (i, object) in objects.iter().enumerate() {
            vecs.set_column(i, &object.coord.unit_vector());
        }

        for system in CoordSystem::ALL {
            if system == CoordSystem::Icrs {
                continue;
            }
            let indices: Vec<usize> = objects
                .iter()
                .enumerate()
                .filter(|(_, object)| object.coord.system() == system)
                .map(|(i, _)| i)
                .collect();
            if indices.is_empty() {
                continue;
            }
            let columns: Vec<Vector3<f64>> = indices
                .iter()
                .map(|&i| vecs.column(i).into_owned())
                .collect();
            let rotated = rotation(system, CoordSystem::Icrs) * Matrix3xX::from_columns(&columns);
            for (k, &i) in indices.iter().enumerate() {
                vecs.set_column(i, &rotated.column(k).into_owned());
            }
        }

        let mut lon = Vec::with_capacity(n);
        let mut lat = Vec::with_capacity(n);
        for i in 0..n {
            let column = vecs.column(i);
            let coord = SkyCoord::from_unit_vector(
                CoordSystem::Icrs,
                Vector3::new(column[0], column[1], column[2]),
            );
            lon.push(coord.lon_rad());
            lat.push(coord.lat_rad());
        }
        CoordBatch { lon, lat }
    }

    pub fn len(&self) -> usize {
        self.lon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Right ascensions in radians.
    pub fn lon(&self) -> &[Radian] {
        &self.lon
    }

    /// Declinations in radians.
    pub fn lat(&self) -> &[Radian] {
        &self.lat
    }
}
