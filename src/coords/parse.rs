//! Parsing of user-entered coordinate strings.

use crate::constants::Degree;
use crate::hedwig_errors::{CoordParseKind, HedwigError};

use super::system::{AngleUnit, CoordSystem};
use super::SkyCoord;

/// Parse a pair of user-entered coordinate strings for the given system.
///
/// A component that reads as a plain floating-point number is taken as a
/// value in degrees regardless of the system's native unit, so users can
/// enter either sexagesimal or decimal-degree values transparently.
/// Anything else is read as sexagesimal fields in the native unit of its
/// axis (hour angle for equatorial longitude, degrees otherwise).
///
/// All failures are reported as [`HedwigError::CoordParse`] naming the
/// target and the failure category, never as a raw panic or conversion
/// error.
pub fn parse_coord(
    system: CoordSystem,
    x: &str,
    y: &str,
    name: &str,
) -> Result<SkyCoord, HedwigError> {
    let info = system.info();
    let coord_error = |kind| HedwigError::CoordParse {
        target: name.to_string(),
        kind,
    };

    let x_deg = parse_component(x, info.unit_x).map_err(coord_error)?;
    let y_deg = parse_component(y, info.unit_y).map_err(coord_error)?;

    SkyCoord::from_degrees(system, x_deg, y_deg).map_err(|error| match error {
        HedwigError::LatitudeOutOfRange(_) => coord_error(CoordParseKind::Range),
        _ => coord_error(CoordParseKind::Unexpected),
    })
}

/// Parse one coordinate component to degrees.
fn parse_component(raw: &str, unit: AngleUnit) -> Result<Degree, CoordParseKind> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(CoordParseKind::Value);
    }

    // Plain float: degrees, whatever the native unit of the axis.
    if let Ok(value) = text.parse::<f64>() {
        if !value.is_finite() {
            return Err(CoordParseKind::Value);
        }
        return Ok(value);
    }

    let value = parse_sexagesimal(text)?;
    Ok(value * unit.degrees_per_unit())
}

/// Parse a sexagesimal string ("12:34:56.7", "12 34 56.7" or "-5:30") to a
/// value in the leading field's unit.
fn parse_sexagesimal(text: &str) -> Result<f64, CoordParseKind> {
    let fields: Vec<&str> = text
        .split(|c: char| c == ':' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .collect();

    // A lone field already failed the plain-float parse above; more than
    // three fields cannot correspond to any supported unit.
    if fields.len() < 2 {
        return Err(CoordParseKind::Value);
    }
    if fields.len() > 3 {
        return Err(CoordParseKind::Units);
    }

    let negative = fields[0].trim_start().starts_with('-');

    let mut value = 0.0;
    for (i, field) in fields.iter().enumerate() {
        let parsed: f64 = field.parse().map_err(|_| CoordParseKind::Value)?;
        if !parsed.is_finite() {
            return Err(CoordParseKind::Value);
        }
        if i > 0 && !(0.0..60.0).contains(&parsed) {
            return Err(CoordParseKind::Value);
        }
        value += parsed.abs() / 60f64.powi(i as i32);
    }

    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod parse_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_sexagesimal() {
        assert_relative_eq!(parse_sexagesimal("12:30:00").unwrap(), 12.5);
        assert_relative_eq!(parse_sexagesimal("12 30 00").unwrap(), 12.5);
        assert_relative_eq!(parse_sexagesimal("-05:30").unwrap(), -5.5);
        assert_relative_eq!(parse_sexagesimal("+05:30:18").unwrap(), 5.505);
        assert_relative_eq!(
            parse_sexagesimal("00:00:01").unwrap(),
            1.0 / 3600.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_sexagesimal_rejects() {
        assert_eq!(parse_sexagesimal("1:2:3:4"), Err(CoordParseKind::Units));
        assert_eq!(parse_sexagesimal("1:xx:3"), Err(CoordParseKind::Value));
        assert_eq!(parse_sexagesimal("1:75:0"), Err(CoordParseKind::Value));
        assert_eq!(parse_sexagesimal("abc"), Err(CoordParseKind::Value));
    }

    #[test]
    fn test_plain_number_is_degrees() {
        // For ICRS the native longitude unit is hours, but a plain float
        // must still be read as degrees.
        let plain = parse_coord(CoordSystem::Icrs, "10.5", "20.25", "t").unwrap();
        assert_relative_eq!(plain.lon_deg(), 10.5, epsilon = 1e-12);
        assert_relative_eq!(plain.lat_deg(), 20.25, epsilon = 1e-12);

        let galactic = parse_coord(CoordSystem::Galactic, "10.5", "20.25", "t").unwrap();
        assert_relative_eq!(galactic.lon_deg(), plain.lon_deg(), epsilon = 1e-12);
        assert_relative_eq!(galactic.lat_deg(), plain.lat_deg(), epsilon = 1e-12);
    }

    #[test]
    fn test_sexagesimal_uses_native_units() {
        // 01:30:00 of right ascension is 22.5 degrees.
        let coord = parse_coord(CoordSystem::Icrs, "01:30:00", "-05:30:00", "t").unwrap();
        assert_relative_eq!(coord.lon_deg(), 22.5, epsilon = 1e-12);
        assert_relative_eq!(coord.lat_deg(), -5.5, epsilon = 1e-12);

        // The same string for a degree-native system stays in degrees.
        let galactic = parse_coord(CoordSystem::Galactic, "01:30:00", "-05:30:00", "t").unwrap();
        assert_relative_eq!(galactic.lon_deg(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_error_naming() {
        let error = parse_coord(CoordSystem::Icrs, "nonsense", "0", "NGC 1").unwrap_err();
        assert_eq!(
            error,
            HedwigError::CoordParse {
                target: "NGC 1".to_string(),
                kind: CoordParseKind::Value,
            }
        );
        assert!(error.to_string().contains("NGC 1"));

        let error = parse_coord(CoordSystem::Icrs, "0", "91.0", "NGC 2").unwrap_err();
        assert_eq!(
            error,
            HedwigError::CoordParse {
                target: "NGC 2".to_string(),
                kind: CoordParseKind::Range,
            }
        );

        let error = parse_coord(CoordSystem::Icrs, "1:2:3:4", "0", "NGC 3").unwrap_err();
        assert_eq!(
            error,
            HedwigError::CoordParse {
                target: "NGC 3".to_string(),
                kind: CoordParseKind::Units,
            }
        );
    }
}
