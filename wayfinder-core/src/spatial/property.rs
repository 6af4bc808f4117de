//! Property-based checks comparing KD-tree lookups with a brute-force scan.

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use super::{KdTree, Point};
use crate::test_utils::suite_proptest_config;

fn point_strategy() -> impl Strategy<Value = Point> {
    // A coarse lattice keeps exact duplicates and equidistant ties common.
    prop_oneof![
        3 => (-1_000.0_f64..1_000.0, -1_000.0_f64..1_000.0),
        1 => (-20_i32..20, -20_i32..20).prop_map(|(x, y)| (f64::from(x), f64::from(y))),
    ]
    .prop_map(Point::from)
}

fn brute_force_distance(points: &[Point], query: &Point) -> Option<f64> {
    points
        .iter()
        .map(|point| point.distance_squared(query))
        .min_by(f64::total_cmp)
}

fn run_nearest_matches_brute_force(points: &[Point], queries: &[Point]) -> TestCaseResult {
    let tree = KdTree::from_points(points.iter().copied())
        .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
    for query in queries {
        let found = tree
            .nearest(*query)
            .map_err(|err| TestCaseError::fail(format!("nearest failed: {err}")))?;
        prop_assert!(points.contains(&found), "{} is not a stored point", found);
        prop_assert_eq!(
            Some(found.distance_squared(query)),
            brute_force_distance(points, query),
            "query {} answered with {}",
            query,
            found
        );
    }
    Ok(())
}

fn run_idempotent_insertion(points: &[Point], queries: &[Point]) -> TestCaseResult {
    let once = KdTree::from_points(points.iter().copied())
        .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
    let twice = KdTree::from_points(points.iter().chain(points).copied())
        .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
    prop_assert_eq!(once.len(), twice.len());
    prop_assert_eq!(once.points(), twice.points());
    for query in queries {
        prop_assert_eq!(once.nearest(*query), twice.nearest(*query));
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn kdtree_nearest_matches_brute_force(
        points in prop::collection::vec(point_strategy(), 1..200),
        queries in prop::collection::vec(point_strategy(), 1..32),
    ) {
        run_nearest_matches_brute_force(&points, &queries)?;
    }

    #[test]
    fn kdtree_insertion_is_idempotent(
        points in prop::collection::vec(point_strategy(), 1..100),
        queries in prop::collection::vec(point_strategy(), 1..16),
    ) {
        run_idempotent_insertion(&points, &queries)?;
    }
}

#[rstest]
#[case::seed_42(42)]
#[case::seed_999(999)]
#[case::seed_7777(7_777)]
fn seeded_clouds_match_brute_force(#[case] seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut sample = |count: usize| -> Vec<Point> {
        (0..count)
            .map(|_| Point::new(rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)))
            .collect()
    };
    let points = sample(2_000);
    let queries = sample(200);
    run_nearest_matches_brute_force(&points, &queries).expect("tree must agree with scan");
}
