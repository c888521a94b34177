//! End-to-end layout of a process document.
//!
//! `layout_process` is what the rendering surface calls on every change of
//! the step list, the dependency list or the highlight sets:
//! 1. Levels the graph (`dag::level_report`).
//! 2. Places every step (`position::place_with`).
//! 3. Attaches style flags (`highlight::annotate`).
//! 4. Summarises what had to be worked around in a `LayoutReport`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::dag::level_report;
use crate::highlight::{annotate, EdgeStyle, Highlights, NodeStyle};
use crate::models::{DependencyEdge, Point, Process, StepId};
use crate::position::place_with;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One positioned step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    pub id: StepId,
    pub name: String,
    pub level: usize,
    pub position: Point,
    pub style: NodeStyle,
}

/// One dependency edge with its style flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLayout {
    pub source: StepId,
    pub target: StepId,
    pub style: EdgeStyle,
}

/// Diagnostics for a layout run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Edges with an endpoint outside the step list.
    pub dropped_edges: Vec<DependencyEdge>,
    /// Steps the traversal could not reach, placed in the fallback column.
    pub unleveled: Vec<StepId>,
    /// Number of columns used.
    pub columns: usize,
    /// Bounding box width of all node boxes.
    pub width: f64,
    /// Bounding box height of all node boxes.
    pub height: f64,
}

/// Everything the rendering surface needs to draw a process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessLayout {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub report: LayoutReport,
}

impl ProcessLayout {
    pub fn node(&self, id: &StepId) -> Option<&NodeLayout> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Lay out `process` and attach highlight flags.
///
/// Never fails: dangling edges are dropped, cyclic residue goes to the
/// fallback column, and an empty process yields an empty layout.
#[instrument(skip_all, fields(process = %process.name, steps = process.steps.len()))]
pub fn layout_process(
    process: &Process,
    highlights: &Highlights,
    config: &LayoutConfig,
) -> ProcessLayout {
    let leveling = level_report(&process.steps, &process.dependencies);
    let positions = place_with(&process.steps, &leveling.levels, config);
    let annotations = annotate(&process.steps, &process.dependencies, highlights);

    let mut seen: HashSet<&StepId> = HashSet::with_capacity(process.steps.len());
    let nodes: Vec<NodeLayout> = process
        .steps
        .iter()
        .zip(annotations.nodes)
        .filter(|(step, _)| seen.insert(&step.id))
        .filter_map(|(step, style)| {
            Some(NodeLayout {
                id: step.id.clone(),
                name: step.name.clone(),
                level: *leveling.levels.get(&step.id)?,
                position: *positions.get(&step.id)?,
                style,
            })
        })
        .collect();

    let edges: Vec<EdgeLayout> = process
        .dependencies
        .iter()
        .zip(annotations.edges)
        .map(|(edge, style)| EdgeLayout {
            source: edge.source_step_id.clone(),
            target: edge.target_step_id.clone(),
            style,
        })
        .collect();

    let (width, height) = bounding_box(&nodes, config);
    let report = LayoutReport {
        dropped_edges: leveling.dropped_edges,
        unleveled: leveling.unleveled,
        columns: nodes.iter().map(|n| n.level + 1).max().unwrap_or(0),
        width,
        height,
    };

    debug!(
        "layout ready: {} nodes, {} edges, {} column(s), {}x{}",
        nodes.len(),
        edges.len(),
        report.columns,
        report.width,
        report.height
    );

    ProcessLayout { nodes, edges, report }
}

/// Width and height spanned by the node boxes; zero for no nodes.
fn bounding_box(nodes: &[NodeLayout], config: &LayoutConfig) -> (f64, f64) {
    let Some(first) = nodes.first() else {
        return (0.0, 0.0);
    };

    let (mut min, mut max) = (first.position, first.position);
    for node in nodes {
        min.x = min.x.min(node.position.x);
        min.y = min.y.min(node.position.y);
        max.x = max.x.max(node.position.x);
        max.y = max.y.max(node.position.y);
    }

    (
        max.x - min.x + config.node_width,
        max.y - min.y + config.node_height,
    )
}
