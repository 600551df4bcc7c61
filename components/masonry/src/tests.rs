//! Balancing properties checked over generated inputs.
//!
//! Each test draws a few hundred random data sets from a seeded RNG so
//! failures are reproducible.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{ColumnBalancer, HeightMap, MasonryConfig, MasonryGrid, balance};

// ============================================================================
// Test Infrastructure
// ============================================================================

struct Case {
    items: Vec<u32>,
    columns: usize,
    heights: HeightMap,
    gap: f32,
}

fn random_case(rng: &mut StdRng) -> Case {
    let len: u32 = rng.gen_range(0..40);
    let columns = rng.gen_range(1..6);
    let mut heights = HeightMap::new();
    for index in 0..len as usize {
        // Leave roughly one item in five unmeasured.
        if rng.gen_bool(0.8) {
            let height = f32::from(rng.gen_range(0_u16..400));
            heights.record(index, height).unwrap();
        }
    }
    let gap = f32::from(rng.gen_range(0_u8..16));
    Case {
        items: (0..len).map(|i| i * 10).collect(),
        columns,
        heights,
        gap,
    }
}

fn cases(seed: u64, count: usize) -> Vec<Case> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| random_case(&mut rng)).collect()
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn every_item_lands_in_exactly_one_column() {
    for case in cases(7, 300) {
        let columns = balance(&case.items, case.columns, &case.heights, case.gap).unwrap();
        assert_eq!(columns.len(), case.columns);

        let mut seen: Vec<usize> = columns
            .iter()
            .flat_map(|column| column.items().iter().map(|entry| entry.index))
            .collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..case.items.len()).collect();
        assert_eq!(seen, expected);

        for column in &columns {
            for entry in column.items() {
                assert_eq!(*entry.item, case.items[entry.index]);
            }
        }
    }
}

#[test]
fn items_keep_source_order_within_a_column() {
    for case in cases(11, 300) {
        let columns = balance(&case.items, case.columns, &case.heights, case.gap).unwrap();
        for column in &columns {
            let indices: Vec<usize> = column.items().iter().map(|entry| entry.index).collect();
            assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}

#[test]
fn balancing_is_deterministic() {
    for case in cases(13, 200) {
        let balancer = ColumnBalancer::with_column_count(case.columns)
            .and_then(|balancer| balancer.gap(case.gap))
            .unwrap();
        let first = balancer.assign(case.items.len(), &case.heights);
        let second = balancer.assign(case.items.len(), &case.heights.clone());
        assert_eq!(first, second);
    }
}

#[test]
fn column_spread_is_bounded_by_largest_item() {
    for case in cases(17, 300) {
        let placeholder = 150.0;
        let balancer = ColumnBalancer::with_column_count(case.columns)
            .and_then(|balancer| balancer.gap(case.gap))
            .and_then(|balancer| balancer.placeholder_height(placeholder))
            .unwrap();
        let assignment = balancer.assign(case.items.len(), &case.heights);

        let largest = (0..case.items.len())
            .map(|index| case.heights.height_or(index, placeholder))
            .fold(0.0, f32::max);
        let totals = assignment.total_heights();
        let max = totals.iter().copied().fold(f32::MIN, f32::max);
        let min = totals.iter().copied().fold(f32::MAX, f32::min);

        if case.items.len() >= case.columns {
            assert!(
                max - min <= largest + case.gap,
                "spread {} exceeds {} (+gap {})",
                max - min,
                largest,
                case.gap
            );
        }
    }
}

#[test]
fn grid_settles_after_one_measurement_round() {
    let mut rng = StdRng::seed_from_u64(23);
    let heights: Vec<f32> = (0..25)
        .map(|_| f32::from(rng.gen_range(40_u16..260)))
        .collect();
    let mut grid = MasonryGrid::with_items(MasonryConfig::default(), heights).unwrap();

    let mut rounds = 0;
    loop {
        let tree = grid.render(|height, _| *height);
        let reports: Vec<(usize, f32)> = tree
            .cells()
            .iter()
            .map(|cell| (cell.index(), *cell.content()))
            .collect();

        let mut changed = false;
        for (index, height) in reports {
            changed |= grid.on_item_measured(index, height).unwrap();
        }
        rounds += 1;
        if !changed {
            break;
        }
        assert!(rounds < 5, "layout did not settle");
    }

    assert_eq!(rounds, 2);
    assert!(grid.is_fully_measured());
    assert!(!grid.needs_rebalance());
}
