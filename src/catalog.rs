//! Source-list parsing.
//!
//! Converts an uploaded or pasted plain-text catalog into a target
//! collection. The expected logical fields per row, in order, are: name,
//! x, y, system, time, priority. Extra trailing fields are dropped.

use crate::constants::TargetCollection;
use crate::coords::{format_coord, parse_coord, CoordSystem};
use crate::hedwig_errors::HedwigError;
use crate::targets::Target;

/// Delimiters considered during sniffing. `:` is deliberately absent: it
/// appears inside sexagesimal coordinate values and would corrupt
/// detection if allowed.
const DELIMITERS: [u8; 4] = [b'\t', b',', b';', b' '];

/// Parse a plain-text source list into a target collection.
///
/// The delimiter is sniffed from the first non-empty line. Rows are
/// assigned sequential identifiers starting at `number_from`, so repeated
/// uploads into an existing list do not collide with existing identifiers.
/// Coordinates are validated through the coordinate engine and stored in
/// their formatted canonical form.
pub fn parse_source_list(text: &str, number_from: i64) -> Result<TargetCollection, HedwigError> {
    // Trailing whitespace is stripped per line before anything else:
    // spreadsheets export trailing tabs which would otherwise leak an empty
    // trailing field into the system column.
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(HedwigError::EmptySourceList);
    }

    let delimiter = sniff_delimiter(lines[0])?;
    let joined = lines.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let mut targets = TargetCollection::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|_| HedwigError::MalformedSourceList)?;
        let mut fields: Vec<&str> = record.iter().map(str::trim).collect();
        if delimiter == b' ' {
            // Runs of spaces produce empty fields; collapse them.
            fields.retain(|field| !field.is_empty());
        }

        let target = parse_row(&fields, index, number_from)?;
        targets.push(target);
    }

    if targets.is_empty() {
        return Err(HedwigError::EmptySourceList);
    }
    Ok(targets)
}

fn parse_row(fields: &[&str], index: usize, number_from: i64) -> Result<Target, HedwigError> {
    let field = |i: usize| fields.get(i).copied().unwrap_or("");

    let name = field(0);
    if name.is_empty() {
        return Err(HedwigError::MissingTargetName(index + 1));
    }

    let system_name = field(3);
    if system_name.is_empty() {
        return Err(HedwigError::MissingSystem {
            target: name.to_string(),
        });
    }
    let system = CoordSystem::by_name(system_name).ok_or_else(|| HedwigError::UnknownSystem {
        value: system_name.to_string(),
        target: name.to_string(),
    })?;

    let raw_x = field(1);
    let raw_y = field(2);
    let (x, y) = if raw_x.is_empty() && raw_y.is_empty() {
        // No fixed position, e.g. a target of opportunity.
        (String::new(), String::new())
    } else {
        let coord = parse_coord(system, raw_x, raw_y, name)?;
        format_coord(&coord, false)
    };

    let optional = |i: usize| {
        let value = field(i);
        (!value.is_empty()).then(|| value.to_string())
    };

    Ok(Target {
        id: number_from + index as i64,
        proposal_id: None,
        sort_order: index as i32,
        name: name.to_string(),
        system,
        x,
        y,
        time: optional(4),
        priority: optional(5),
        note: None,
    })
}

/// Choose the delimiter by sniffing the first line only.
fn sniff_delimiter(first_line: &str) -> Result<u8, HedwigError> {
    let counts: Vec<usize> = DELIMITERS
        .iter()
        .map(|&delimiter| first_line.bytes().filter(|&b| b == delimiter).count())
        .collect();
    let best = counts.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return Err(HedwigError::MalformedSourceList);
    }
    // Ties go to the earlier candidate: tabs and commas are more likely to
    // be intentional separators than spaces.
    let position = counts.iter().position(|&count| count == best).unwrap_or(0);
    Ok(DELIMITERS[position])
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a\tb\tc"), Ok(b'\t'));
        assert_eq!(sniff_delimiter("a,b,c"), Ok(b','));
        assert_eq!(sniff_delimiter("a;b;c"), Ok(b';'));
        assert_eq!(sniff_delimiter("a b c"), Ok(b' '));
        // Colons inside sexagesimal values must never win.
        assert_eq!(sniff_delimiter("name,01:30:00,-05:30:00,ICRS"), Ok(b','));
        assert_eq!(sniff_delimiter("justonefield"), Err(HedwigError::MalformedSourceList));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_source_list("", 0), Err(HedwigError::EmptySourceList));
        assert_eq!(
            parse_source_list("\n  \n\t\n", 0),
            Err(HedwigError::EmptySourceList)
        );
    }

    #[test]
    fn test_basic_row() {
        let targets = parse_source_list("M31,00:42:44.3,+41:16:09,ICRS,4,1\n", 0).unwrap();
        assert_eq!(targets.len(), 1);
        let target = &targets[0];
        assert_eq!(target.name, "M31");
        assert_eq!(target.system, CoordSystem::Icrs);
        assert_eq!(target.x, "00:42:44.300");
        assert_eq!(target.y, "+41:16:09.00");
        assert_eq!(target.time.as_deref(), Some("4"));
        assert_eq!(target.priority.as_deref(), Some("1"));
    }

    #[test]
    fn test_number_from_offset() {
        let targets = parse_source_list("A 1 2 ICRS\nB 3 4 Galactic\n", 10).unwrap();
        assert_eq!(targets[0].id, 10);
        assert_eq!(targets[1].id, 11);
        assert_eq!(targets[1].system, CoordSystem::Galactic);
    }

    #[test]
    fn test_blank_position_kept() {
        let targets = parse_source_list("ToO,,,ICRS\n", 0).unwrap();
        assert_eq!(targets[0].x, "");
        assert_eq!(targets[0].y, "");
        assert!(!targets[0].has_coords());
    }

    #[test]
    fn test_missing_system() {
        assert_eq!(
            parse_source_list("M31,00:42:44,+41:16:09\n", 0),
            Err(HedwigError::MissingSystem {
                target: "M31".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_system_names_value_and_target() {
        let error = parse_source_list("M31,00:42:44,+41:16:09,XYZ\n", 0).unwrap_err();
        assert_eq!(
            error,
            HedwigError::UnknownSystem {
                value: "XYZ".to_string(),
                target: "M31".to_string()
            }
        );
        let message = error.to_string();
        assert!(message.contains("XYZ"));
        assert!(message.contains("M31"));
    }

    #[test]
    fn test_missing_name_cites_row() {
        assert_eq!(
            parse_source_list("A,1,2,ICRS\n,3,4,ICRS\n", 0),
            Err(HedwigError::MissingTargetName(2))
        );
    }

    #[test]
    fn test_extra_fields_dropped() {
        let targets = parse_source_list("M31,1,2,ICRS,4,1,extra,stuff\n", 0).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].priority.as_deref(), Some("1"));
    }
}
