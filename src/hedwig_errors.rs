//! Error taxonomy of the crate.
//!
//! Every fallible operation returns [`HedwigError`]; user-facing callers
//! render the display form directly, so each message names the offending
//! input (target name, row number, identifier) rather than an internal
//! state.

use thiserror::Error;

/// Category of a coordinate-string parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordParseKind {
    /// Fields parsed but the resulting angle is outside its valid range.
    Range,
    /// A field is missing, not numeric, or out of its sexagesimal range.
    Value,
    /// More sexagesimal fields than any supported unit can hold.
    Units,
    /// A failure that does not fit the other categories.
    Unexpected,
}

impl std::fmt::Display for CoordParseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CoordParseKind::Range => "value out of range",
            CoordParseKind::Value => "invalid value",
            CoordParseKind::Units => "too many fields",
            CoordParseKind::Unexpected => "unexpected error",
        };
        write!(f, "{text}")
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HedwigError {
    #[error("the source list appears to be empty")]
    EmptySourceList,

    #[error("the source list could not be read as delimited text")]
    MalformedSourceList,

    #[error("row {0} of the source list has no target name")]
    MissingTargetName(usize),

    #[error("no coordinate system was given for target \"{target}\"")]
    MissingSystem { target: String },

    #[error("did not recognise coordinate system \"{value}\" for target \"{target}\"")]
    UnknownSystem { value: String, target: String },

    #[error("coordinate system identifier {0} is not recognised")]
    UnknownSystemId(u16),

    #[error("could not parse coordinates for target \"{target}\": {kind}")]
    CoordParse {
        target: String,
        kind: CoordParseKind,
    },

    #[error("latitude {0} is outside the range -90 to 90 degrees")]
    LatitudeOutOfRange(f64),

    #[error("search radius {0} arcseconds is not one of the offered options")]
    InvalidSearchRadius(f64),

    #[error("no usable search radius exists at coverage order {0}")]
    NoRadiusOptions(u8),

    #[error(
        "the search area for target \"{target}\" covers an excessive \
         number of HEALPix cells ({count})"
    )]
    ExcessiveCells { target: String, count: usize },

    #[error("the end of the date range precedes its start")]
    DateRangeInverted,

    #[error("the date range spans {days} days, more than a year")]
    DateRangeExcessive { days: i64 },

    #[error("no coverage maps have been set up for this search")]
    CoverageNotConfigured,

    #[error("coverage map {0} was not found")]
    CoverageNotFound(i64),
}

#[cfg(test)]
mod hedwig_errors_test {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let error = HedwigError::UnknownSystem {
            value: "FK4".to_string(),
            target: "M31".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("FK4"));
        assert!(message.contains("M31"));

        assert!(HedwigError::MissingTargetName(3)
            .to_string()
            .contains("row 3"));
        assert!(HedwigError::CoverageNotFound(42).to_string().contains("42"));
    }

    #[test]
    fn test_coord_parse_kind_display() {
        let error = HedwigError::CoordParse {
            target: "t".to_string(),
            kind: CoordParseKind::Units,
        };
        assert!(error.to_string().contains("too many fields"));
    }
}
