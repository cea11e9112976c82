//! Observing-site description used by the availability engine.

use serde::Serialize;

use crate::constants::Degree;

/// One facility's observing site and nightly shift window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservingSite {
    pub name: String,
    /// Geodetic longitude in degrees east of Greenwich.
    pub longitude: Degree,
    /// Geodetic latitude in degrees.
    pub latitude: Degree,
    /// Minimum elevation at which a target counts as observable.
    pub el_min: Degree,
    /// Start of the observing shift, in UT hours.
    pub shift_start: f64,
    /// Duration of the observing shift, in hours.
    pub shift_duration: f64,
}

impl ObservingSite {
    pub fn new(
        name: &str,
        longitude: Degree,
        latitude: Degree,
        el_min: Degree,
        shift_start: f64,
        shift_duration: f64,
    ) -> ObservingSite {
        ObservingSite {
            name: name.to_string(),
            longitude,
            latitude,
            el_min,
            shift_start,
            shift_duration,
        }
    }
}
