//! Property-based comparison of A* against a Dijkstra oracle.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    time::Duration,
};

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use super::{AStarGraph, SolverOutcome, WeightedEdge, solve};
use crate::test_utils::suite_proptest_config;

const BUDGET: Duration = Duration::from_secs(30);

/// Random directed graph with integer weights so path sums are exact in `f64`.
#[derive(Clone, Debug)]
struct RandomGraph {
    vertex_count: u32,
    adjacency: HashMap<u32, Vec<(u32, u32)>>,
    /// Exact remaining distance to the goal, when a guided run is requested.
    estimates: Option<HashMap<u32, u32>>,
}

impl RandomGraph {
    fn new(vertex_count: u32, edges: &[(u32, u32, u32)]) -> Self {
        let mut adjacency: HashMap<u32, Vec<(u32, u32)>> = HashMap::new();
        for &(from, to, weight) in edges {
            adjacency.entry(from).or_default().push((to, weight));
        }
        Self {
            vertex_count,
            adjacency,
            estimates: None,
        }
    }

    fn reversed(&self) -> Self {
        let edges: Vec<(u32, u32, u32)> = self
            .adjacency
            .iter()
            .flat_map(|(&from, out)| out.iter().map(move |&(to, weight)| (to, from, weight)))
            .collect();
        Self::new(self.vertex_count, &edges)
    }

    /// Returns a copy whose heuristic is the true distance to `goal`, which
    /// is both admissible and consistent.
    fn guided_towards(&self, goal: u32) -> Self {
        let mut guided = self.clone();
        guided.estimates = Some(dijkstra(&self.reversed(), goal));
        guided
    }
}

impl AStarGraph for RandomGraph {
    type Vertex = u32;

    fn neighbors(&self, vertex: &u32) -> Vec<WeightedEdge<u32>> {
        self.adjacency
            .get(vertex)
            .map(|out| {
                out.iter()
                    .map(|&(to, weight)| WeightedEdge::new(*vertex, to, f64::from(weight)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn estimated_distance_to_goal(&self, vertex: &u32, _goal: &u32) -> f64 {
        // Vertices that cannot reach the goal estimate zero, which keeps the
        // heuristic admissible.
        self.estimates
            .as_ref()
            .and_then(|table| table.get(vertex))
            .map_or(0.0, |distance| distance_as_f64(*distance))
    }
}

fn distance_as_f64(distance: u32) -> f64 {
    f64::from(distance)
}

/// Textbook Dijkstra returning the distance to every reachable vertex.
fn dijkstra(graph: &RandomGraph, source: u32) -> HashMap<u32, u32> {
    let mut distances = HashMap::from([(source, 0_u32)]);
    let mut heap = BinaryHeap::from([Reverse((0_u32, source))]);
    while let Some(Reverse((distance, vertex))) = heap.pop() {
        if distances.get(&vertex).is_some_and(|known| distance > *known) {
            continue;
        }
        for &(to, weight) in graph.adjacency.get(&vertex).into_iter().flatten() {
            let candidate = distance + weight;
            if distances.get(&to).is_none_or(|known| candidate < *known) {
                distances.insert(to, candidate);
                heap.push(Reverse((candidate, to)));
            }
        }
    }
    distances
}

fn route_weight(graph: &RandomGraph, route: &[u32]) -> Option<u32> {
    route.windows(2).try_fold(0_u32, |total, pair| {
        let (from, to) = (pair.first()?, pair.get(1)?);
        let cheapest = graph
            .adjacency
            .get(from)?
            .iter()
            .filter(|(next, _)| next == to)
            .map(|(_, weight)| *weight)
            .min()?;
        Some(total + cheapest)
    })
}

fn run_oracle_equivalence(graph: &RandomGraph, start: u32, goal: u32) -> TestCaseResult {
    let expected = dijkstra(graph, start).get(&goal).copied();
    let report = solve(graph, start, goal, BUDGET)
        .map_err(|err| TestCaseError::fail(format!("search failed: {err}")))?;

    match expected {
        None => {
            prop_assert_eq!(report.outcome(), SolverOutcome::Unsolvable);
            prop_assert!(report.solution().is_empty());
            prop_assert_eq!(report.solution_weight(), 0.0);
        }
        Some(distance) => {
            prop_assert_eq!(report.outcome(), SolverOutcome::Solved);
            prop_assert_eq!(report.solution_weight(), distance_as_f64(distance));
            prop_assert_eq!(report.solution().first(), Some(&start));
            prop_assert_eq!(report.solution().last(), Some(&goal));
            prop_assert_eq!(route_weight(graph, report.solution()), Some(distance));
        }
    }
    Ok(())
}

fn graph_strategy() -> impl Strategy<Value = (RandomGraph, u32, u32)> {
    (2_u32..40).prop_flat_map(|vertex_count| {
        let edge = (0..vertex_count, 0..vertex_count, 0_u32..20);
        (
            prop::collection::vec(edge, 0..(vertex_count as usize * 3)),
            0..vertex_count,
            0..vertex_count,
        )
            .prop_map(move |(edges, start, goal)| {
                (RandomGraph::new(vertex_count, &edges), start, goal)
            })
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn astar_matches_dijkstra_with_zero_heuristic((graph, start, goal) in graph_strategy()) {
        run_oracle_equivalence(&graph, start, goal)?;
    }

    #[test]
    fn astar_matches_dijkstra_with_exact_heuristic((graph, start, goal) in graph_strategy()) {
        run_oracle_equivalence(&graph.guided_towards(goal), start, goal)?;
    }
}

#[rstest]
#[case::sparse_42(42, 200, 1)]
#[case::dense_999(999, 120, 8)]
#[case::medium_7777(7_777, 400, 3)]
fn seeded_graphs_match_dijkstra(#[case] seed: u64, #[case] vertex_count: u32, #[case] degree: u32) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges: Vec<(u32, u32, u32)> = (0..vertex_count * degree)
        .map(|_| {
            (
                rng.gen_range(0..vertex_count),
                rng.gen_range(0..vertex_count),
                rng.gen_range(1..100),
            )
        })
        .collect();
    let graph = RandomGraph::new(vertex_count, &edges);
    for _ in 0..10 {
        let start = rng.gen_range(0..vertex_count);
        let goal = rng.gen_range(0..vertex_count);
        run_oracle_equivalence(&graph, start, goal).expect("zero heuristic must agree");
        run_oracle_equivalence(&graph.guided_towards(goal), start, goal)
            .expect("exact heuristic must agree");
    }
}
