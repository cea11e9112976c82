//! # Constants and type definitions
//!
//! This module centralizes the **angular conversion factors**, **safety
//! limits** and **common type definitions** used throughout the crate. It
//! also defines the container type for target collections.
//!
//! These definitions are used by all main modules, including the coordinate
//! engine, the clash search and the availability computation.

use smallvec::SmallVec;

use crate::targets::Target;

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours of right ascension → degrees
pub const DEG_PER_HOUR: f64 = 15.0;

/// Degrees → arcseconds
pub const ARCSEC_PER_DEG: f64 = 3600.0;

// -------------------------------------------------------------------------------------------------
// Safety limits
// -------------------------------------------------------------------------------------------------

/// Hard per-target cap on the number of coverage cells a search disc may
/// decompose into. The radius menu normally keeps searches well below this;
/// the cap defends against a radius and order combination that evades it.
pub const MAX_SEARCH_CELLS: usize = 20_000;

/// Longest availability date range accepted, in days.
pub const MAX_DATE_RANGE_DAYS: f64 = 370.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// HEALPix cell identifier (NESTED scheme)
pub type CellId = u64;
/// HEALPix subdivision order
pub type HealpixOrder = u8;

/// A small, inline-optimized container for the targets of one proposal.
pub type TargetCollection = SmallVec<[Target; 8]>;
