//! Position assignment — turn levels into canvas coordinates.
//!
//! Columns are laid out left to right at a fixed stride.  Inside a column,
//! nodes are stacked top to bottom in input order and the stack is centred
//! on `y = 0`.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::models::{LevelAssignment, Point, PositionMap, StepId, StepNode};

/// Place every node using the default [`LayoutConfig`].
pub fn place(nodes: &[StepNode], levels: &LevelAssignment) -> PositionMap {
    place_with(nodes, levels, &LayoutConfig::default())
}

/// Place every node using the given layout constants.
///
/// The returned map has exactly one entry per distinct id in `nodes`.  A node
/// missing from `levels` is put in the column after the largest level given.
pub fn place_with(
    nodes: &[StepNode],
    levels: &LevelAssignment,
    config: &LayoutConfig,
) -> PositionMap {
    let overflow = levels.values().max().map_or(0, |max| max + 1);

    // Ascending level, input order inside each bucket.
    let mut buckets: BTreeMap<usize, Vec<&StepId>> = BTreeMap::new();
    let mut seen: HashSet<&StepId> = HashSet::with_capacity(nodes.len());

    for node in nodes {
        if !seen.insert(&node.id) {
            continue;
        }
        let column = levels.get(&node.id).copied().unwrap_or(overflow);
        buckets.entry(column).or_default().push(&node.id);
    }

    let row_stride = config.row_stride();
    let mut positions = PositionMap::with_capacity(seen.len());

    for (&column, ids) in &buckets {
        let x = column as f64 * config.column_stride();
        let total_height = ids.len() as f64 * row_stride - config.v_gap;

        for (row, &id) in ids.iter().enumerate() {
            let y = row as f64 * row_stride - total_height / 2.0;
            positions.insert(id.clone(), Point::new(x, y));
        }
    }

    debug!(
        "placed {} nodes in {} column(s)",
        positions.len(),
        buckets.len()
    );

    positions
}
