//! Formatting of canonical coordinates for display.

use serde::Serialize;

use crate::constants::Degree;

use super::system::CoordSystem;
use super::SkyCoord;

/// One coordinate system's rendering of a position, as produced by
/// [`format_coord_all_systems`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordAllSystem {
    pub system: CoordSystem,
    pub x: String,
    pub y: String,
    pub x_deg: Degree,
    pub y_deg: Degree,
}

/// Format a coordinate in its own system's display convention.
///
/// Sexagesimal systems use colon-separated fields, unsigned longitude and
/// always-signed latitude; decimal systems use signed decimal degrees. With
/// `fixed_precision` (used for converted secondary displays) the longitude
/// is rounded to one decimal place of seconds and the latitude to whole
/// seconds, or both axes to three decimal places of degrees for decimal
/// systems. Output is zero-padded for column alignment.
pub fn format_coord(coord: &SkyCoord, fixed_precision: bool) -> (String, String) {
    let info = coord.system().info();
    if info.decimal {
        if fixed_precision {
            (
                format!("{:07.3}", coord.lon_deg()),
                format!("{:+07.3}", coord.lat_deg()),
            )
        } else {
            (
                format!("{:010.6}", coord.lon_deg()),
                format!("{:+010.6}", coord.lat_deg()),
            )
        }
    } else {
        let lon_value = coord.lon_deg() / info.unit_x.degrees_per_unit();
        let (lon_precision, lat_precision) = if fixed_precision { (1, 0) } else { (3, 2) };
        (
            to_sexagesimal(lon_value, lon_precision, false),
            to_sexagesimal(coord.lat_deg(), lat_precision, true),
        )
    }
}

/// Render one position in every supported system.
///
/// The entry for the coordinate's own system is exact full-precision
/// output; every converted entry uses fixed precision, since a converted
/// value past the original's resolution would suggest accuracy that is not
/// there.
pub fn format_coord_all_systems(coord: &SkyCoord) -> Vec<CoordAllSystem> {
    CoordSystem::ALL
        .into_iter()
        .map(|system| {
            let (converted, fixed) = if system == coord.system() {
                (*coord, false)
            } else {
                (coord.to_system(system), true)
            };
            let (x, y) = format_coord(&converted, fixed);
            CoordAllSystem {
                system,
                x,
                y,
                x_deg: converted.lon_deg(),
                y_deg: converted.lat_deg(),
            }
        })
        .collect()
}

/// Format a value (in its display unit) as colon-separated sexagesimal
/// fields with the given number of decimal places of seconds.
///
/// Rounding is done once on an integer scale so that carries propagate
/// exactly (59.96 seconds at one decimal place becomes the next minute,
/// not "60.0").
fn to_sexagesimal(value: f64, precision: u32, always_sign: bool) -> String {
    let negative = value < 0.0;
    let scale = 10u64.pow(precision);
    let total = (value.abs() * 3600.0 * scale as f64).round() as u64;

    let fraction = total % scale;
    let seconds = total / scale;
    let s = seconds % 60;
    let m = (seconds / 60) % 60;
    let d = seconds / 3600;

    let sign = if negative {
        "-"
    } else if always_sign {
        "+"
    } else {
        ""
    };

    if precision == 0 {
        format!("{sign}{d:02}:{m:02}:{s:02}")
    } else {
        format!(
            "{sign}{d:02}:{m:02}:{s:02}.{fraction:0width$}",
            width = precision as usize
        )
    }
}

#[cfg(test)]
mod format_test {
    use super::*;

    #[test]
    fn test_sexagesimal_fields() {
        assert_eq!(to_sexagesimal(12.5, 3, false), "12:30:00.000");
        assert_eq!(to_sexagesimal(-5.505, 2, true), "-05:30:18.00");
        assert_eq!(to_sexagesimal(5.505, 2, true), "+05:30:18.00");
        assert_eq!(to_sexagesimal(0.0, 0, true), "+00:00:00");
    }

    #[test]
    fn test_sexagesimal_carry() {
        // 59.96 seconds rounded to one decimal place must carry into the
        // next minute, not print 60.0.
        let value = (59.0 * 60.0 + 59.96) / 3600.0;
        assert_eq!(to_sexagesimal(value, 1, false), "01:00:00.0");
        assert_eq!(to_sexagesimal(value, 2, false), "00:59:59.96");
    }

    #[test]
    fn test_format_equatorial() {
        let coord = SkyCoord::from_degrees(CoordSystem::Icrs, 22.5, -5.505).unwrap();
        assert_eq!(
            format_coord(&coord, false),
            ("01:30:00.000".to_string(), "-05:30:18.00".to_string())
        );
        assert_eq!(
            format_coord(&coord, true),
            ("01:30:00.0".to_string(), "-05:30:18".to_string())
        );
    }

    #[test]
    fn test_format_decimal() {
        let coord = SkyCoord::from_degrees(CoordSystem::Galactic, 10.5, 20.25).unwrap();
        assert_eq!(
            format_coord(&coord, false),
            ("010.500000".to_string(), "+20.250000".to_string())
        );
        assert_eq!(
            format_coord(&coord, true),
            ("010.500".to_string(), "+20.250".to_string())
        );
    }

    #[test]
    fn test_all_systems() {
        let coord = SkyCoord::from_degrees(CoordSystem::Icrs, 266.405, -28.936).unwrap();
        let rendered = format_coord_all_systems(&coord);
        assert_eq!(rendered.len(), CoordSystem::ALL.len());

        let own = rendered
            .iter()
            .find(|entry| entry.system == CoordSystem::Icrs)
            .unwrap();
        // Own-system entry keeps full precision.
        assert_eq!(own.x.len(), "17:45:37.200".len());

        let galactic = rendered
            .iter()
            .find(|entry| entry.system == CoordSystem::Galactic)
            .unwrap();
        // Near the Galactic center, converted and fixed-precision.
        assert!(galactic.x_deg < 0.5 || galactic.x_deg > 359.5);
        assert!(galactic.y_deg.abs() < 0.5);
        assert_eq!(galactic.x.len(), "000.000".len());
    }
}
