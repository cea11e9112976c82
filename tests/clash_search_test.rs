mod common;

use common::icrs_object;
use hedwig_astro::clash::{radius_options, ClashSearch};
use hedwig_astro::coverage::MemoryCoverageStore;
use hedwig_astro::healpix::{CellIndexer, HealpixIndexer};
use hedwig_astro::hedwig_errors::HedwigError;

const ORDER: u8 = 12;

#[test]
fn test_end_to_end_clash() {
    let indexer = HealpixIndexer;

    // A coverage map holding exactly the cell under a known position.
    let position = icrs_object("W3(OH)", 36.75, 61.88);
    let cell = indexer.cells_for_disc(&position.coord, 0.0, ORDER);
    assert_eq!(cell.len(), 1);

    let mut store = MemoryCoverageStore::new();
    store.insert(7, "Archive map", true, cell);

    let search = ClashSearch::new(ORDER, &indexer, &store);
    let far_away = icrs_object("elsewhere", 200.0, -40.0);
    let (clashes, non_clashes) = search
        .moc_search(&[position.clone(), far_away], true, 0.0)
        .unwrap();

    assert_eq!(clashes.len(), 1);
    assert_eq!(non_clashes.len(), 1);
    assert_eq!(clashes[0].target.name, "W3(OH)");
    let mocs = clashes[0].mocs.as_ref().unwrap();
    assert_eq!(mocs.len(), 1);
    assert_eq!(mocs[0].id, 7);
    assert_eq!(mocs[0].name, "Archive map");
    assert_eq!(non_clashes[0].mocs, None);
}

#[test]
fn test_inclusive_disc_clash_at_radius() {
    let indexer = HealpixIndexer;

    let map_center = icrs_object("center", 120.0, 30.0);
    let map_cells = indexer.cells_for_disc(&map_center.coord, 0.0, ORDER);

    let mut store = MemoryCoverageStore::new();
    store.insert(1, "Pointing", true, map_cells);

    // A target offset by about half an arcminute clashes at a one
    // arcminute radius but its own cell does not coincide.
    let nearby = icrs_object("nearby", 120.0, 30.0 + 30.0 / 3600.0);
    let search = ClashSearch::new(ORDER, &indexer, &store);

    let (clashes, _) = search.moc_search(&[nearby.clone()], true, 60.0).unwrap();
    assert_eq!(clashes.len(), 1);
    assert_eq!(clashes[0].target.name, "nearby");
}

#[test]
fn test_private_maps_hidden_from_public_search() {
    let indexer = HealpixIndexer;
    let target = icrs_object("t", 10.0, 10.0);
    let cell = indexer.cells_for_disc(&target.coord, 0.0, ORDER);

    let mut store = MemoryCoverageStore::new();
    store.insert(1, "Private map", false, cell);

    let search = ClashSearch::new(ORDER, &indexer, &store);

    // Under public-only the store exposes nothing at all.
    assert_eq!(
        search.moc_search(std::slice::from_ref(&target), true, 0.0),
        Err(HedwigError::CoverageNotConfigured)
    );

    let (clashes, _) = search
        .moc_search(std::slice::from_ref(&target), false, 0.0)
        .unwrap();
    assert_eq!(clashes.len(), 1);
}

#[test]
fn test_radius_menu_cells_stay_bounded() {
    // Every menu radius decomposes into a workable cell count, far below
    // the hard cap.
    let indexer = HealpixIndexer;
    let target = icrs_object("probe", 56.2, -12.9);
    for option in radius_options(ORDER).unwrap() {
        let cells = indexer.cells_for_disc(&target.coord, option.arcsec, ORDER);
        assert!(!cells.is_empty(), "{} produced no cells", option.label);
        assert!(
            cells.len() <= 20_000,
            "{} produced {} cells",
            option.label,
            cells.len()
        );
    }
}

#[test]
fn test_galactic_target_searched_in_icrs() {
    let indexer = HealpixIndexer;

    // The same position entered in Galactic coordinates must land in the
    // same cells as its ICRS expression.
    let icrs = icrs_object("eq", 83.633, 22.014);
    let galactic = hedwig_astro::targets::TargetObject::new(
        "gal",
        hedwig_astro::coords::CoordSystem::Galactic,
        icrs.coord
            .to_system(hedwig_astro::coords::CoordSystem::Galactic),
    );

    let mut store = MemoryCoverageStore::new();
    store.insert(1, "Map", true, indexer.cells_for_disc(&icrs.coord, 0.0, ORDER));

    let search = ClashSearch::new(ORDER, &indexer, &store);
    let (clashes, non_clashes) = search.moc_search(&[galactic], true, 0.0).unwrap();
    assert_eq!(clashes.len(), 1);
    assert!(non_clashes.is_empty());
}
