//! Property-based tests for the layout engine.
//!
//! Random graphs over a small id space, including self-loops, cycles,
//! parallel edges and edges to ids that are not in the node list.
//! Coverage targets:
//! - Completeness of the position map
//! - Left-to-right ordering along every edge the traversal reached
//! - No vertical overlap inside a column
//! - Determinism

use std::collections::HashMap;

use layout::{level_report, place, place_with, DependencyEdge, LayoutConfig, StepId, StepNode};
use proptest::prelude::*;

prop_compose! {
    /// Up to 24 distinct nodes plus up to 48 edges drawn from ids 0..32, so
    /// some edges dangle.
    fn arb_graph()(
        count in 0usize..24,
        raw_edges in prop::collection::vec((0i64..32, 0i64..32), 0..48),
    ) -> (Vec<StepNode>, Vec<DependencyEdge>) {
        let nodes = (0..count as i64)
            .map(|id| StepNode::new(id, format!("step-{id}")))
            .collect();
        let edges = raw_edges
            .into_iter()
            .map(|(from, to)| DependencyEdge::new(from, to))
            .collect();
        (nodes, edges)
    }
}

prop_compose! {
    /// An acyclic graph: edges only go from lower to higher ids.
    fn arb_dag()(graph in arb_graph()) -> (Vec<StepNode>, Vec<DependencyEdge>) {
        let (nodes, edges) = graph;
        let edges = edges
            .into_iter()
            .filter(|e| match (&e.source_step_id, &e.target_step_id) {
                (StepId::Int(from), StepId::Int(to)) => from < to,
                _ => false,
            })
            .collect();
        (nodes, edges)
    }
}

fn arb_config() -> impl Strategy<Value = LayoutConfig> {
    (1.0f64..400.0, 1.0f64..200.0, 0.0f64..200.0, 0.0f64..100.0).prop_map(
        |(node_width, node_height, h_gap, v_gap)| LayoutConfig {
            node_width,
            node_height,
            h_gap,
            v_gap,
        },
    )
}

proptest! {
    /// Property: every node gets exactly one position, whatever the edges.
    #[test]
    fn every_node_is_placed((nodes, edges) in arb_graph()) {
        let leveling = level_report(&nodes, &edges);
        let positions = place(&nodes, &leveling.levels);

        prop_assert_eq!(leveling.levels.len(), nodes.len());
        prop_assert_eq!(positions.len(), nodes.len());
        for node in &nodes {
            prop_assert!(positions.contains_key(&node.id));
        }
    }

    /// Property: edges between nodes the traversal reached point left to right.
    #[test]
    fn reached_edges_point_right((nodes, edges) in arb_graph()) {
        let leveling = level_report(&nodes, &edges);
        let positions = place(&nodes, &leveling.levels);

        for edge in &edges {
            let (from, to) = (&edge.source_step_id, &edge.target_step_id);
            let reached = |id: &StepId| {
                leveling.levels.contains_key(id) && !leveling.unleveled.contains(id)
            };
            if reached(from) && reached(to) {
                prop_assert!(leveling.levels[from] < leveling.levels[to]);
                prop_assert!(positions[from].x < positions[to].x);
            }
        }
    }

    /// Property: on acyclic input nothing falls back and every edge points right.
    #[test]
    fn dags_need_no_fallback((nodes, edges) in arb_dag()) {
        let leveling = level_report(&nodes, &edges);
        prop_assert!(leveling.unleveled.is_empty());

        for edge in edges.iter().filter(|e| !leveling.dropped_edges.contains(e)) {
            prop_assert!(leveling.levels[&edge.source_step_id] < leveling.levels[&edge.target_step_id]);
        }
    }

    /// Property: nodes sharing a column are at least one row stride apart.
    #[test]
    fn columns_never_overlap((nodes, edges) in arb_graph(), config in arb_config()) {
        let leveling = level_report(&nodes, &edges);
        let positions = place_with(&nodes, &leveling.levels, &config);

        let mut columns: HashMap<usize, Vec<f64>> = HashMap::new();
        for node in &nodes {
            columns
                .entry(leveling.levels[&node.id])
                .or_default()
                .push(positions[&node.id].y);
        }

        // Allow for rounding in the centring offset.
        let min_gap = config.row_stride() - 1e-9;
        for ys in columns.values() {
            for pair in ys.windows(2) {
                prop_assert!(pair[1] - pair[0] >= min_gap);
            }
        }
    }

    /// Property: identical inputs produce identical maps.
    #[test]
    fn layout_is_deterministic((nodes, edges) in arb_graph()) {
        let first = place(&nodes, &level_report(&nodes, &edges).levels);
        let second = place(&nodes, &level_report(&nodes, &edges).levels);
        prop_assert_eq!(first, second);
    }
}
