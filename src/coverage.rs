//! Coverage-map storage interface.
//!
//! The clash engine consumes coverage maps purely as sets of HEALPix cells
//! behind the [`CoverageStore`] trait; how the sets were produced (MOC
//! import, observation logs) is the persistence layer's concern. The
//! in-memory implementation serves tests and embedders without a database.

use serde::Serialize;

use crate::healpix::CellSet;
use crate::hedwig_errors::HedwigError;

/// Metadata of one coverage map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageInfo {
    pub id: i64,
    pub name: String,
    /// Whether the map is visible to non-administrative users.
    pub public: bool,
}

/// Persistence-side collaborator holding coverage-map cell sets.
pub trait CoverageStore {
    /// Number of coverage maps visible under the given constraint.
    fn coverage_count(&self, public_only: bool) -> usize;

    /// Coverage maps whose cell sets intersect the query cells, subject to
    /// the visibility constraint, ordered by map identifier.
    fn find_intersecting(&self, public_only: bool, cells: &CellSet) -> Vec<CoverageInfo>;

    /// Metadata lookup by map identifier.
    fn coverage_info(&self, id: i64) -> Result<CoverageInfo, HedwigError>;
}

/// One stored coverage map: metadata plus its cell set.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMap {
    pub info: CoverageInfo,
    pub cells: CellSet,
}

/// In-memory [`CoverageStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryCoverageStore {
    maps: Vec<CoverageMap>,
}

impl MemoryCoverageStore {
    pub fn new() -> MemoryCoverageStore {
        MemoryCoverageStore::default()
    }

    pub fn insert(&mut self, id: i64, name: &str, public: bool, cells: CellSet) {
        self.maps.push(CoverageMap {
            info: CoverageInfo {
                id,
                name: name.to_string(),
                public,
            },
            cells,
        });
        self.maps.sort_by_key(|map| map.info.id);
    }

    fn visible(&self, public_only: bool) -> impl Iterator<Item = &CoverageMap> {
        self.maps
            .iter()
            .filter(move |map| !public_only || map.info.public)
    }
}

impl CoverageStore for MemoryCoverageStore {
    fn coverage_count(&self, public_only: bool) -> usize {
        self.visible(public_only).count()
    }

    fn find_intersecting(&self, public_only: bool, cells: &CellSet) -> Vec<CoverageInfo> {
        self.visible(public_only)
            .filter(|map| !map.cells.is_disjoint(cells))
            .map(|map| map.info.clone())
            .collect()
    }

    fn coverage_info(&self, id: i64) -> Result<CoverageInfo, HedwigError> {
        self.maps
            .iter()
            .find(|map| map.info.id == id)
            .map(|map| map.info.clone())
            .ok_or(HedwigError::CoverageNotFound(id))
    }
}
