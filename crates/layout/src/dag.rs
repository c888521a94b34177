//! Graph leveling — assign every step a topological column.
//!
//! A step's level is the length of the longest dependency path reaching it
//! from any step without predecessors.  The traversal is Kahn's algorithm
//! over a FIFO queue, so it is iterative and O(V + E).
//!
//! Malformed input never aborts the computation:
//! 1. Edges with an endpoint outside the node list are skipped.
//! 2. Steps the traversal never reaches (cycle members and everything
//!    downstream of a cycle) share one fallback column to the right of the
//!    deepest leveled column.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::models::{DependencyEdge, LevelAssignment, StepId, StepNode};

/// A level assignment plus what had to be worked around to produce it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leveling {
    /// Column index for every distinct node id.
    pub levels: LevelAssignment,
    /// Edges ignored because an endpoint is not in the node list, in input order.
    pub dropped_edges: Vec<DependencyEdge>,
    /// Nodes placed in the fallback column, in input order.
    pub unleveled: Vec<StepId>,
}

/// Compute the level of every node.
///
/// Total for every node in `nodes`; never panics, terminates on cyclic input.
pub fn level(nodes: &[StepNode], edges: &[DependencyEdge]) -> LevelAssignment {
    level_report(nodes, edges).levels
}

/// Like [`level`], but also report dropped edges and fallback nodes.
pub fn level_report(nodes: &[StepNode], edges: &[DependencyEdge]) -> Leveling {
    // -----------------------------------------------------------------------
    // 1. Adjacency list and in-degree over edges with both endpoints known
    // -----------------------------------------------------------------------
    let mut order: Vec<&StepId> = Vec::with_capacity(nodes.len());
    let mut adjacency: HashMap<&StepId, Vec<&StepId>> = HashMap::with_capacity(nodes.len());
    let mut in_degree: HashMap<&StepId, usize> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        if in_degree.insert(&node.id, 0).is_none() {
            adjacency.insert(&node.id, Vec::new());
            order.push(&node.id);
        }
    }

    let mut dropped_edges = Vec::new();
    for edge in edges {
        let (from, to) = (&edge.source_step_id, &edge.target_step_id);
        if !in_degree.contains_key(from) || !in_degree.contains_key(to) {
            dropped_edges.push(edge.clone());
            continue;
        }
        if let Some(targets) = adjacency.get_mut(from) {
            targets.push(to);
        }
        if let Some(deg) = in_degree.get_mut(to) {
            *deg += 1;
        }
    }

    if !dropped_edges.is_empty() {
        warn!(
            "ignoring {} edge(s) with a missing endpoint",
            dropped_edges.len()
        );
    }

    // -----------------------------------------------------------------------
    // 2. Seed the queue with sources, in input order
    // -----------------------------------------------------------------------
    let mut levels: HashMap<&StepId, usize> = HashMap::with_capacity(order.len());
    let mut queue: VecDeque<&StepId> = VecDeque::new();

    for &id in &order {
        if in_degree[id] == 0 {
            levels.insert(id, 0);
            queue.push_back(id);
        }
    }

    // -----------------------------------------------------------------------
    // 3. Longest-path relaxation
    // -----------------------------------------------------------------------
    while let Some(node_id) = queue.pop_front() {
        let next = levels[node_id] + 1;

        for &target in &adjacency[node_id] {
            let slot = levels.entry(target).or_insert(0);
            *slot = (*slot).max(next);

            if let Some(deg) = in_degree.get_mut(target) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(target);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // 4. Fallback column for nodes that never reached in-degree 0
    // -----------------------------------------------------------------------
    // `levels` may hold provisional entries for nodes inside a cycle that were
    // relaxed but never dequeued; those do not count as leveled.
    let mut max_level: Option<usize> = None;
    let mut unleveled: Vec<&StepId> = Vec::new();
    for &id in &order {
        if in_degree[id] == 0 {
            max_level = max_level.max(Some(levels[id]));
        } else {
            unleveled.push(id);
        }
    }

    let fallback = max_level.map_or(0, |max| max + 1);
    for &id in &unleveled {
        levels.insert(id, fallback);
    }

    if !unleveled.is_empty() {
        warn!(
            "{} node(s) unreachable from a source (cycle?), placed in column {}",
            unleveled.len(),
            fallback
        );
    }

    debug!(
        "leveled {} nodes over {} edges into {} column(s)",
        order.len(),
        edges.len() - dropped_edges.len(),
        levels.values().max().map_or(0, |max| max + 1)
    );

    Leveling {
        levels: levels.into_iter().map(|(id, lvl)| (id.clone(), lvl)).collect(),
        dropped_edges,
        unleveled: unleveled.into_iter().cloned().collect(),
    }
}
