//! Spatial clash search.
//!
//! Determines which proposal targets overlap stored coverage maps, and
//! which targets across proposals overlap each other, by decomposing search
//! discs into HEALPix cells and intersecting cell sets.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::constants::{ArcSec, HealpixOrder, MAX_SEARCH_CELLS};
use crate::coords::{CoordSystem, SkyCoord};
use crate::coverage::{CoverageInfo, CoverageStore};
use crate::healpix::{cell_size_arcsec, CellIndexer, CellSet};
use crate::hedwig_errors::HedwigError;
use crate::targets::TargetObject;

/// Fixed multiples of each angular unit offered as search radii.
const RADIUS_MULTIPLES: [u32; 4] = [1, 3, 15, 30];

/// Arcsecond value and singular label of each radius unit.
const RADIUS_UNITS: [(f64, &str); 3] =
    [(1.0, "arcsecond"), (60.0, "arcminute"), (3600.0, "degree")];

/// Smallest radius offered, as a fraction of the cell size. Below half a
/// cell the search degenerates to the single cell under the target.
const RADIUS_MIN_CELLS: f64 = 0.5;

/// Largest radius offered, in cell widths. Beyond this the cell count of a
/// single disc becomes pathological for the cell-store query.
const RADIUS_MAX_CELLS: f64 = 35.0;

/// One entry of the search-radius menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusOption {
    pub arcsec: ArcSec,
    pub label: String,
}

/// Derive the search-radius menu for coverage maps of the given order.
///
/// Arbitrary radii risk either a degenerate zero-cell search or a
/// combinatorially huge one; restricting the menu to fixed multiples
/// between half a cell width and 35 cell widths bounds both. An empty menu
/// means the facility's coverage order is misconfigured.
pub fn radius_options(order: HealpixOrder) -> Result<Vec<RadiusOption>, HedwigError> {
    let cell = cell_size_arcsec(order);
    let minimum = RADIUS_MIN_CELLS * cell;
    let maximum = RADIUS_MAX_CELLS * cell;

    let mut options = Vec::new();
    for (unit_arcsec, unit_name) in RADIUS_UNITS {
        for multiple in RADIUS_MULTIPLES {
            let arcsec = multiple as f64 * unit_arcsec;
            if (minimum..=maximum).contains(&arcsec) {
                let plural = if multiple > 1 { "s" } else { "" };
                options.push(RadiusOption {
                    arcsec,
                    label: format!("{multiple} {unit_name}{plural}"),
                });
            }
        }
    }

    if options.is_empty() {
        return Err(HedwigError::NoRadiusOptions(order));
    }
    options.sort_by(|a, b| a.arcsec.total_cmp(&b.arcsec));
    Ok(options)
}

/// External archive queries for one searched position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveLink {
    pub name: &'static str,
    pub url: String,
}

/// Build archive search links for a position, in ICRS degrees.
pub fn archive_links(coord: &SkyCoord) -> Vec<ArchiveLink> {
    let icrs = coord.to_system(CoordSystem::Icrs);
    let (ra, dec) = (icrs.lon_deg(), icrs.lat_deg());
    vec![
        ArchiveLink {
            name: "CADC",
            url: format!(
                "https://www.cadc-ccda.hia-iha.nrc-cnrc.gc.ca/en/search/\
                 ?Plane.position.bounds={ra:.5}%20{dec:.5}"
            ),
        },
        ArchiveLink {
            name: "SIMBAD",
            url: format!(
                "https://simbad.u-strasbg.fr/simbad/sim-coo\
                 ?Coord={ra:.5}%20{dec:+.5}&Radius=2&Radius.unit=arcmin"
            ),
        },
    ]
}

/// Result record for one searched target: the coverage maps it clashed
/// with (`None` for a non-clash) and archive links for follow-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSearchRecord {
    pub target: TargetObject,
    pub mocs: Option<Vec<CoverageInfo>>,
    pub links: Vec<ArchiveLink>,
}

/// One proposal's identifier and resolved targets, as compared by the
/// cross-proposal searches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalTargets {
    pub proposal_id: i64,
    pub targets: Vec<TargetObject>,
}

/// Result of the N-proposal pairwise search: the clashing proposal-id
/// pairs, and the set of proposal ids appearing in at least one clash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalClashes {
    pub pairs: Vec<(i64, i64)>,
    pub proposal_ids: BTreeSet<i64>,
}

/// Result of the exactly-two-proposal search at per-target granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairClashes {
    /// Every individual pair of targets whose cell sets intersect.
    pub target_pairs: Vec<(TargetObject, TargetObject)>,
    /// Names of first-proposal targets appearing in any clash, input order.
    pub clashed_a: Vec<String>,
    /// Names of second-proposal targets appearing in any clash, input order.
    pub clashed_b: Vec<String>,
}

/// Clash search engine over an injected cell indexer and coverage store.
pub struct ClashSearch<'a, I: CellIndexer, S: CoverageStore> {
    order: HealpixOrder,
    indexer: &'a I,
    store: &'a S,
}

impl<'a, I: CellIndexer, S: CoverageStore> ClashSearch<'a, I, S> {
    pub fn new(order: HealpixOrder, indexer: &'a I, store: &'a S) -> ClashSearch<'a, I, S> {
        ClashSearch {
            order,
            indexer,
            store,
        }
    }

    /// Search every target against the stored coverage maps.
    ///
    /// Returns the clashing and non-clashing records as two ordered lists;
    /// every input target appears in exactly one of them.
    pub fn moc_search(
        &self,
        targets: &[TargetObject],
        public: bool,
        radius: ArcSec,
    ) -> Result<(Vec<TargetSearchRecord>, Vec<TargetSearchRecord>), HedwigError> {
        if self.store.coverage_count(public) == 0 {
            return Err(HedwigError::CoverageNotConfigured);
        }
        self.check_radius(radius)?;

        let mut clashes = Vec::new();
        let mut non_clashes = Vec::new();
        for target in targets {
            let cells = self.disc_cells(target, radius)?;
            let mocs = self.store.find_intersecting(public, &cells);
            log::debug!(
                "clash search: target \"{}\" has {} cells, {} matches",
                target.name,
                cells.len(),
                mocs.len()
            );

            let links = archive_links(&target.coord);
            if mocs.is_empty() {
                non_clashes.push(TargetSearchRecord {
                    target: target.clone(),
                    mocs: None,
                    links,
                });
            } else {
                clashes.push(TargetSearchRecord {
                    target: target.clone(),
                    mocs: Some(mocs),
                    links,
                });
            }
        }
        Ok((clashes, non_clashes))
    }

    /// Pairwise search across any number of proposals, at whole-proposal
    /// granularity: each proposal's targets are merged into one cell set
    /// and every pair of non-disjoint sets is reported.
    ///
    /// Inherently O(P²) set intersections; acceptable for an administrative
    /// batch comparison over one call's proposals.
    pub fn search_between_proposals(
        &self,
        proposals: &[ProposalTargets],
        radius: ArcSec,
    ) -> Result<ProposalClashes, HedwigError> {
        self.check_radius(radius)?;

        let mut cell_sets = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            let mut cells = CellSet::new();
            for target in &proposal.targets {
                cells.extend(self.disc_cells(target, radius)?);
            }
            cell_sets.push((proposal.proposal_id, cells));
        }

        let mut pairs = Vec::new();
        let mut proposal_ids = BTreeSet::new();
        for (a, b) in cell_sets.iter().tuple_combinations() {
            if !a.1.is_disjoint(&b.1) {
                pairs.push((a.0, b.0));
                proposal_ids.insert(a.0);
                proposal_ids.insert(b.0);
            }
        }
        Ok(ProposalClashes {
            pairs,
            proposal_ids,
        })
    }

    /// Compare exactly two proposals at per-target granularity, reporting
    /// every individual target pair whose cells intersect.
    pub fn search_proposal_pair(
        &self,
        first: &ProposalTargets,
        second: &ProposalTargets,
        radius: ArcSec,
    ) -> Result<PairClashes, HedwigError> {
        self.check_radius(radius)?;

        let first_cells = self.per_target_cells(&first.targets, radius)?;
        let second_cells = self.per_target_cells(&second.targets, radius)?;

        let mut target_pairs = Vec::new();
        let mut clashed_a = Vec::new();
        let mut clashed_b = Vec::new();
        for (target_a, cells_a) in first.targets.iter().zip(&first_cells) {
            for (target_b, cells_b) in second.targets.iter().zip(&second_cells) {
                if !cells_a.is_disjoint(cells_b) {
                    target_pairs.push((target_a.clone(), target_b.clone()));
                    if !clashed_a.contains(&target_a.name) {
                        clashed_a.push(target_a.name.clone());
                    }
                    if !clashed_b.contains(&target_b.name) {
                        clashed_b.push(target_b.name.clone());
                    }
                }
            }
        }
        Ok(PairClashes {
            target_pairs,
            clashed_a,
            clashed_b,
        })
    }

    fn per_target_cells(
        &self,
        targets: &[TargetObject],
        radius: ArcSec,
    ) -> Result<Vec<CellSet>, HedwigError> {
        targets
            .iter()
            .map(|target| self.disc_cells(target, radius))
            .collect()
    }

    /// Decompose one target's search disc, enforcing the hard cell cap.
    fn disc_cells(&self, target: &TargetObject, radius: ArcSec) -> Result<CellSet, HedwigError> {
        let cells = self
            .indexer
            .cells_for_disc(&target.coord, radius, self.order);
        if cells.len() > MAX_SEARCH_CELLS {
            return Err(HedwigError::ExcessiveCells {
                target: target.name.clone(),
                count: cells.len(),
            });
        }
        Ok(cells)
    }

    /// The menu is the only defense short of the hard cell cap, so the
    /// requested radius must be one of its entries. A zero radius, the
    /// degenerate single-cell point search, is always permitted.
    fn check_radius(&self, radius: ArcSec) -> Result<(), HedwigError> {
        let options = radius_options(self.order)?;
        if radius == 0.0
            || options
                .iter()
                .any(|option| (option.arcsec - radius).abs() < 1e-3)
        {
            Ok(())
        } else {
            Err(HedwigError::InvalidSearchRadius(radius))
        }
    }
}
