//! Stored targets and their ephemeral computation-time projection.

use serde::Serialize;

use crate::constants::TargetCollection;
use crate::coords::{parse_coord, CoordSystem, SkyCoord};
use crate::hedwig_errors::HedwigError;

/// One astronomical source as stored with a proposal.
///
/// The coordinate components are kept exactly as entered (after list
/// formatting) and re-parsed on demand; a blank pair means the proposal has
/// no fixed position for this source, as with targets of opportunity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Target {
    pub id: i64,
    pub proposal_id: Option<i64>,
    pub sort_order: i32,
    pub name: String,
    pub system: CoordSystem,
    pub x: String,
    pub y: String,
    pub time: Option<String>,
    pub priority: Option<String>,
    pub note: Option<String>,
}

impl Target {
    pub fn has_coords(&self) -> bool {
        !(self.x.trim().is_empty() || self.y.trim().is_empty())
    }
}

/// Ephemeral projection of a [`Target`] used during spatial and temporal
/// computation: the coordinate strings resolved to a canonical
/// [`SkyCoord`], plus the fraction of the proposal's requested time
/// attached to this source (when time values were given).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetObject {
    pub name: String,
    pub system: CoordSystem,
    pub coord: SkyCoord,
    pub time_fraction: Option<f64>,
}

impl TargetObject {
    pub fn new(name: &str, system: CoordSystem, coord: SkyCoord) -> TargetObject {
        TargetObject {
            name: name.to_string(),
            system,
            coord,
            time_fraction: None,
        }
    }

    /// Resolve every target with coordinates in the collection.
    ///
    /// Targets without a position are skipped; a target whose stored
    /// strings no longer parse is a hard error rather than a silent drop.
    /// Time fractions are computed over the total of the parseable time
    /// values in the collection.
    pub fn from_collection(targets: &TargetCollection) -> Result<Vec<TargetObject>, HedwigError> {
        let times: Vec<Option<f64>> = targets
            .iter()
            .map(|target| {
                target
                    .time
                    .as_deref()
                    .and_then(|time| time.trim().parse::<f64>().ok())
                    .filter(|time| *time > 0.0)
            })
            .collect();
        let total_time: f64 = times.iter().flatten().sum();

        let mut objects = Vec::new();
        for (target, time) in targets.iter().zip(times) {
            if !target.has_coords() {
                continue;
            }
            let coord = parse_coord(target.system, &target.x, &target.y, &target.name)?;
            objects.push(TargetObject {
                name: target.name.clone(),
                system: target.system,
                coord,
                time_fraction: time
                    .filter(|_| total_time > 0.0)
                    .map(|time| time / total_time),
            });
        }
        Ok(objects)
    }
}
