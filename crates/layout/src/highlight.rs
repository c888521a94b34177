//! Highlight annotation — per-node and per-edge style flags.
//!
//! Bottleneck and critical-path sets are computed by the analytics backend;
//! this module only maps them onto the graph for the rendering surface.
//! Geometry is never affected.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{DependencyEdge, StepId, StepNode};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Externally supplied styling sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    /// Ids of steps flagged as throughput-limiting.
    pub bottlenecks: HashSet<StepId>,
    /// Names of the steps on the critical path.
    pub critical_path: HashSet<String>,
}

impl Highlights {
    pub fn new<B, C>(bottlenecks: B, critical_path: C) -> Self
    where
        B: IntoIterator<Item = StepId>,
        C: IntoIterator<Item = String>,
    {
        Self {
            bottlenecks: bottlenecks.into_iter().collect(),
            critical_path: critical_path.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bottlenecks.is_empty() && self.critical_path.is_empty()
    }
}

/// One bottleneck entry as reported by the analytics backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckInfo {
    pub step_id: StepId,
    #[serde(default)]
    pub step_name: String,
    /// `duration`, `cost`, `sla` or `utilization`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub severity: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub current_value: f64,
}

/// The part of an analysis result that drives highlighting.
///
/// Other fields of the analytics document (cycle time, costs, risk score, …)
/// are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub bottlenecks: Vec<BottleneckInfo>,
    #[serde(default)]
    pub critical_path: Vec<String>,
}

impl From<&AnalysisSummary> for Highlights {
    fn from(summary: &AnalysisSummary) -> Self {
        Self::new(
            summary.bottlenecks.iter().map(|b| b.step_id.clone()),
            summary.critical_path.iter().cloned(),
        )
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub is_bottleneck: bool,
    pub on_critical_path: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// The edge leaves a bottleneck step.
    pub from_bottleneck: bool,
}

/// Style flags aligned index-for-index with the input slices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub nodes: Vec<NodeStyle>,
    pub edges: Vec<EdgeStyle>,
}

/// Compute style flags for every node and edge, in input order.
pub fn annotate(
    nodes: &[StepNode],
    edges: &[DependencyEdge],
    highlights: &Highlights,
) -> Annotations {
    let nodes = nodes
        .iter()
        .map(|node| NodeStyle {
            is_bottleneck: highlights.bottlenecks.contains(&node.id),
            on_critical_path: highlights.critical_path.contains(&node.name),
        })
        .collect();

    let edges = edges
        .iter()
        .map(|edge| EdgeStyle {
            from_bottleneck: highlights.bottlenecks.contains(&edge.source_step_id),
        })
        .collect();

    Annotations { nodes, edges }
}
