use strum::IntoEnumIterator;

use super::*;
use crate::constants::HIGHLIGHT_INTENSITY;
use crate::error::Error;
use crate::labeling::label_components_fresh;
use crate::testing::{fill_disk, fill_rect, raster_from_ascii, raster_to_ascii};

const OTHER: u8 = 96;

/// 120x90 board with five soldering islands:
///
/// - A (15,15) and B (60,15): disks joined by a trace, centered holes
/// - C (80..99, 5..20): rectangle with a centered hole and a dangling trace
/// - D (15,60): disk with an off-center hole, traced to an other component
/// - E (50..73, 50..61): L-shaped island without hole, no traces
fn board() -> Raster {
    let mut r = Raster::new_default(120, 90);

    fill_disk(&mut r, 15, 15, 10, MAX_INTENSITY);
    fill_rect(&mut r, 14, 16, 14, 16, MIN_INTENSITY);
    fill_disk(&mut r, 60, 15, 10, MAX_INTENSITY);
    fill_rect(&mut r, 59, 61, 14, 16, MIN_INTENSITY);
    fill_rect(&mut r, 25, 50, 14, 16, MAX_INTENSITY);

    fill_rect(&mut r, 80, 99, 5, 20, MAX_INTENSITY);
    fill_rect(&mut r, 88, 90, 11, 13, MIN_INTENSITY);
    fill_rect(&mut r, 88, 90, 21, 40, MAX_INTENSITY);

    fill_disk(&mut r, 15, 60, 10, MAX_INTENSITY);
    fill_rect(&mut r, 17, 19, 60, 62, MIN_INTENSITY);
    fill_rect(&mut r, 35, 44, 55, 65, OTHER);
    fill_rect(&mut r, 25, 35, 59, 61, MAX_INTENSITY);

    fill_rect(&mut r, 50, 73, 50, 61, MAX_INTENSITY);
    fill_rect(&mut r, 62, 73, 50, 55, MIN_INTENSITY);

    r
}

fn exact_config() -> CircuitBoardConfig {
    CircuitBoardConfig {
        denoise: false,
        ..Default::default()
    }
}

// ============================================================================
// Full inspection
// ============================================================================

#[test]
fn test_board_counts() {
    let mut raster = board();
    let report = inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection).unwrap();

    assert_eq!(report.stage, CircuitBoardStage::Inspection);
    assert_eq!(report.other_component_count, 1);
    assert_eq!(report.hole_count, 4);
    assert_eq!(report.wire_count, 4);
    assert_eq!(report.connectors_removed, 0);
    assert_eq!(report.island_count(), 5);
    assert_eq!(report.bad_wire_count(), 2);
    assert_eq!(report.defective_island_count(), 2);
}

#[test]
fn test_board_wire_verdicts() {
    let mut raster = board();
    let report = inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection).unwrap();

    let summary: Vec<(usize, bool)> = report.wires.iter().map(|w| (w.connections, w.connected)).collect();
    // A-B net, C with dangling trace, D to other component, lone E
    assert_eq!(summary, vec![(2, true), (1, false), (2, true), (1, false)]);
}

#[test]
fn test_board_island_verdicts() {
    let mut raster = board();
    let report = inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection).unwrap();

    let verdicts: Vec<(IslandShape, HoleStatus)> = report.islands.iter().map(|i| (i.shape, i.hole)).collect();
    assert_eq!(
        verdicts,
        vec![
            (IslandShape::Circular, HoleStatus::Centered),
            (IslandShape::Circular, HoleStatus::Centered),
            (IslandShape::Rectangular, HoleStatus::Centered),
            (IslandShape::Circular, HoleStatus::OffCenter),
            (IslandShape::Defective, HoleStatus::Missing),
        ]
    );
    assert_eq!(report.islands[2].bbox, Aabb::new(80, 99, 5, 20));
    assert!(report.islands[0].is_correct());
    assert!(!report.islands[3].is_correct());
}

#[test]
fn test_board_annotations() {
    let mut raster = board();
    inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection).unwrap();

    // Good islands keep their filled holes, good traces are gone
    assert_eq!(raster[(15, 15)], MAX_INTENSITY);
    assert_eq!(raster[(35, 15)], MIN_INTENSITY);
    assert_eq!(raster[(30, 60)], MIN_INTENSITY);
    // Off-center hole highlighted, rest of its island untouched
    assert_eq!(raster[(18, 61)], HIGHLIGHT_INTENSITY);
    assert_eq!(raster[(15, 55)], MAX_INTENSITY);
    // Bad net C is highlighted including its stripped trace
    assert_eq!(raster[(89, 12)], HIGHLIGHT_INTENSITY);
    assert_eq!(raster[(89, 30)], HIGHLIGHT_INTENSITY);
    // Misshapen E
    assert_eq!(raster[(55, 58)], HIGHLIGHT_INTENSITY);
    // Other components never end up in the copper mask
    assert_eq!(raster[(40, 60)], MIN_INTENSITY);
    assert_eq!(raster[(0, 0)], MIN_INTENSITY);
}

#[test]
fn test_board_with_denoise_keeps_topology() {
    let mut raster = board();
    let report =
        inspect_circuit_board(&mut raster, &CircuitBoardConfig::default(), CircuitBoardStage::Inspection).unwrap();

    assert_eq!(report.wire_count, 4);
    assert_eq!(report.hole_count, 4);
    assert_eq!(report.island_count(), 5);
    assert_eq!(report.bad_wire_count(), 2);
}

#[test]
fn test_connector_counts_as_connection_then_is_removed() {
    // Disk island traced to a 7x7 pad: the pad survives trace stripping but
    // is below the island size.
    let mut raster = Raster::new_default(60, 30);
    fill_disk(&mut raster, 15, 15, 10, MAX_INTENSITY);
    fill_rect(&mut raster, 14, 16, 14, 16, MIN_INTENSITY);
    fill_rect(&mut raster, 25, 45, 14, 16, MAX_INTENSITY);
    fill_rect(&mut raster, 46, 52, 12, 18, MAX_INTENSITY);

    let report = inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection).unwrap();

    assert_eq!(report.wire_count, 1);
    assert_eq!(report.wires[0].connections, 2);
    assert_eq!(report.bad_wire_count(), 0);
    assert_eq!(report.connectors_removed, 1);
    assert_eq!(report.island_count(), 1);
    assert_eq!(raster[(49, 15)], MIN_INTENSITY);
    assert_eq!(raster[(15, 15)], MAX_INTENSITY);
}

// ============================================================================
// Stages
// ============================================================================

#[test]
fn test_wire_segmentation_stage() {
    let mut raster = board();
    let report =
        inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::WireSegmentation).unwrap();

    assert_eq!(report.wire_count, 4);
    assert!(report.wires.is_empty());
    assert!(report.islands.is_empty());
    // Copper with holes filled, traces still present, other parts gone
    assert_eq!(raster[(15, 15)], MAX_INTENSITY);
    assert_eq!(raster[(35, 15)], MAX_INTENSITY);
    assert_eq!(raster[(89, 30)], MAX_INTENSITY);
    assert_eq!(raster[(40, 60)], MIN_INTENSITY);
}

#[test]
fn test_island_segmentation_stage() {
    let mut raster = board();
    let report =
        inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::IslandSegmentation).unwrap();

    assert_eq!(report.wires.len(), 4);
    assert!(report.islands.is_empty());
    assert_eq!(raster[(15, 15)], MAX_INTENSITY);
    assert_eq!(raster[(35, 15)], MIN_INTENSITY);
    assert_eq!(raster[(89, 30)], MIN_INTENSITY);

    let (components, _) = label_components_fresh(&raster).unwrap();
    assert_eq!(foreground(components).len(), 5);
}

#[test]
fn test_every_stage_runs() {
    for stage in CircuitBoardStage::iter() {
        let mut raster = board();
        let report = inspect_circuit_board(&mut raster, &exact_config(), stage).unwrap();
        assert_eq!(report.stage, stage);
        assert_eq!(report.wire_count, 4, "stage {stage}");
    }
}

#[test]
fn test_invalid_input_rejected() {
    let mut raster = Raster::new_default(0, 0);
    assert!(matches!(
        inspect_circuit_board(&mut raster, &exact_config(), CircuitBoardStage::Inspection),
        Err(Error::EmptyRaster { .. })
    ));

    let config = CircuitBoardConfig {
        other_component_dilation: 0,
        ..exact_config()
    };
    let mut raster = board();
    assert!(matches!(
        inspect_circuit_board(&mut raster, &config, CircuitBoardStage::Inspection),
        Err(Error::InvalidConfig { .. })
    ));
}

// ============================================================================
// Trace stripping
// ============================================================================

#[test]
fn test_remove_wires_strips_trace_between_blocks() {
    let mut raster = raster_from_ascii(&[
        "....................", //
        ".######......######.", //
        ".######......######.", //
        ".##################.", //
        ".##################.", //
        ".##################.", //
        ".######......######.", //
        "....................", //
    ]);

    let erased = remove_wires(&mut raster, 5);

    assert_eq!(erased, 18);
    assert_eq!(
        raster_to_ascii(&raster),
        vec![
            "....................",
            ".######......######.",
            ".######......######.",
            ".######......######.",
            ".######......######.",
            ".######......######.",
            ".######......######.",
            "....................",
        ]
    );
}

#[test]
fn test_remove_wires_thickness_limit() {
    let mut bar = Raster::new_default(16, 8);
    fill_rect(&mut bar, 1, 14, 1, 6, MAX_INTENSITY);

    let mut raster = bar.clone();
    assert_eq!(remove_wires(&mut raster, 5), 0);
    assert_eq!(raster, bar);

    let mut raster = bar.clone();
    assert_eq!(remove_wires(&mut raster, 6), 84);
    assert!(raster.pixels().iter().all(|&v| v == MIN_INTENSITY));
}

#[test]
fn test_remove_wires_run_to_border() {
    // A vertical trace reaching the bottom edge ends at the border.
    let mut raster = raster_from_ascii(&[
        ".....", //
        "..#..", //
        "..#..", //
        "..#..", //
    ]);
    assert_eq!(remove_wires(&mut raster, 5), 3);
    assert!(raster.pixels().iter().all(|&v| v == MIN_INTENSITY));
}

// ============================================================================
// Island shape
// ============================================================================

fn single_island(raster: &Raster) -> Component {
    let (components, _) = label_components_fresh(raster).unwrap();
    let mut islands = foreground(components);
    assert_eq!(islands.len(), 1);
    islands.remove(0)
}

#[test]
fn test_classify_disk() {
    for radius in [6, 10, 14] {
        let mut raster = Raster::new_default(40, 40);
        fill_disk(&mut raster, 20, 20, radius, MAX_INTENSITY);
        let island = single_island(&raster);
        assert_eq!(classify_island_shape(&island, 40), IslandShape::Circular, "radius {radius}");
    }
}

#[test]
fn test_classify_rectangle_and_square() {
    let mut raster = Raster::new_default(40, 40);
    fill_rect(&mut raster, 5, 24, 10, 25, MAX_INTENSITY);
    let island = single_island(&raster);
    assert_eq!(classify_island_shape(&island, 40), IslandShape::Rectangular);
    assert!(is_soldering_island_correct(&island, 40));

    // Too much area for a disk of its width
    let mut raster = Raster::new_default(40, 40);
    fill_rect(&mut raster, 5, 24, 5, 24, MAX_INTENSITY);
    let island = single_island(&raster);
    assert_eq!(classify_island_shape(&island, 40), IslandShape::Rectangular);
}

#[test]
fn test_classify_defective() {
    let mut raster = Raster::new_default(40, 40);
    fill_rect(&mut raster, 5, 28, 5, 16, MAX_INTENSITY);
    fill_rect(&mut raster, 17, 28, 5, 10, MIN_INTENSITY);
    let island = single_island(&raster);
    assert_eq!(classify_island_shape(&island, 40), IslandShape::Defective);
    assert!(!is_soldering_island_correct(&island, 40));
}
