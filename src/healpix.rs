//! HEALPix cell decomposition.
//!
//! The spherical-indexing library sits behind the narrow [`CellIndexer`]
//! trait so the clash engine can be exercised with a deterministic stand-in
//! and the production implementation swapped without touching the search
//! logic.

use std::collections::BTreeSet;

use crate::constants::{ArcSec, CellId, HealpixOrder, ARCSEC_PER_DEG, RADEG, RADSEC};
use crate::coords::{CoordSystem, SkyCoord};

/// Set of cell identifiers at a single subdivision order.
pub type CellSet = BTreeSet<CellId>;

/// Decomposition of a search disc into covering cells.
pub trait CellIndexer {
    /// Cells at `order` covering a disc of `radius` arcseconds around the
    /// given position. Coverage is inclusive: cells partially overlapping
    /// the disc are included, so a clash can never be missed at the cost of
    /// occasional false positives.
    fn cells_for_disc(&self, coord: &SkyCoord, radius: ArcSec, order: HealpixOrder) -> CellSet;
}

/// Production indexer backed by the `cdshealpix` NESTED scheme.
#[derive(Debug, Default, Clone, Copy)]
pub struct HealpixIndexer;

impl CellIndexer for HealpixIndexer {
    fn cells_for_disc(&self, coord: &SkyCoord, radius: ArcSec, order: HealpixOrder) -> CellSet {
        let icrs = coord.to_system(CoordSystem::Icrs);
        let lon = icrs.lon_rad();
        let lat = icrs.lat_rad();

        if radius <= 0.0 {
            // A degenerate disc is the single cell containing the point.
            return CellSet::from([cdshealpix::nested::hash(order, lon, lat)]);
        }

        // Two extra subdivision levels refine the cone boundary before the
        // result is degraded back to `order`.
        cdshealpix::nested::cone_coverage_approx_custom(order, 2, lon, lat, radius * RADSEC)
            .flat_iter()
            .collect()
    }
}

/// Characteristic angular size of one cell at the given order, in
/// arcseconds: the side of a square of the same solid angle.
pub fn cell_size_arcsec(order: HealpixOrder) -> ArcSec {
    let n_cells = 12.0 * 4f64.powi(order as i32);
    let area_sr = 4.0 * std::f64::consts::PI / n_cells;
    area_sr.sqrt() / RADEG * ARCSEC_PER_DEG
}
