//! Supported celestial coordinate systems and their display metadata.

use serde::Serialize;

use crate::constants::DEG_PER_HOUR;
use crate::hedwig_errors::HedwigError;

/// Angular unit in which one axis of user-entered coordinates is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AngleUnit {
    /// Hour angle (1 hour = 15 degrees), used for equatorial longitude.
    Hour,
    /// Plain degrees.
    Degree,
}

impl AngleUnit {
    pub fn degrees_per_unit(self) -> f64 {
        match self {
            AngleUnit::Hour => DEG_PER_HOUR,
            AngleUnit::Degree => 1.0,
        }
    }
}

/// Display and parsing metadata for one coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    /// Stable numeric identifier used by the persistence layer.
    pub id: u16,
    /// Display name, also matched (case-insensitively) in source lists.
    pub name: &'static str,
    /// Unit of the longitude-like axis.
    pub unit_x: AngleUnit,
    /// Unit of the latitude-like axis.
    pub unit_y: AngleUnit,
    /// Whether values are displayed as decimal degrees rather than
    /// sexagesimal fields.
    pub decimal: bool,
}

/// Closed enumeration of the coordinate systems a target may be stored in.
///
/// Every system identifier appearing elsewhere in the data model must be a
/// member of this enumeration; unknown identifiers are a user-facing error,
/// never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CoordSystem {
    Icrs,
    Galactic,
}

const ICRS_INFO: SystemInfo = SystemInfo {
    id: 1,
    name: "ICRS",
    unit_x: AngleUnit::Hour,
    unit_y: AngleUnit::Degree,
    decimal: false,
};

const GALACTIC_INFO: SystemInfo = SystemInfo {
    id: 2,
    name: "Galactic",
    unit_x: AngleUnit::Degree,
    unit_y: AngleUnit::Degree,
    decimal: true,
};

impl CoordSystem {
    /// All supported systems, in display order.
    pub const ALL: [CoordSystem; 2] = [CoordSystem::Icrs, CoordSystem::Galactic];

    pub fn info(self) -> &'static SystemInfo {
        match self {
            CoordSystem::Icrs => &ICRS_INFO,
            CoordSystem::Galactic => &GALACTIC_INFO,
        }
    }

    pub fn id(self) -> u16 {
        self.info().id
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Resolve a persisted system identifier.
    pub fn from_id(id: u16) -> Result<CoordSystem, HedwigError> {
        CoordSystem::ALL
            .into_iter()
            .find(|system| system.id() == id)
            .ok_or(HedwigError::UnknownSystemId(id))
    }

    pub fn is_valid(id: u16) -> bool {
        CoordSystem::from_id(id).is_ok()
    }

    /// (identifier, name) pairs for building selection widgets.
    pub fn get_options() -> Vec<(u16, &'static str)> {
        CoordSystem::ALL
            .into_iter()
            .map(|system| (system.id(), system.name()))
            .collect()
    }

    /// Case-insensitive lookup by display name, as used for the system
    /// column of uploaded source lists.
    pub fn by_name(name: &str) -> Option<CoordSystem> {
        let wanted = name.trim();
        CoordSystem::ALL
            .into_iter()
            .find(|system| system.name().eq_ignore_ascii_case(wanted))
    }
}

impl std::fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
