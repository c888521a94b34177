//! Domain models consumed by the layout engine.
//!
//! These mirror the process / step / dependency documents the dashboard
//! edits.  The layout engine only ever looks at identifiers, names and
//! edges; the scalar step attributes are carried through untouched.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StepId
// ---------------------------------------------------------------------------

/// Identifier of a process step.
///
/// Persisted steps carry integer keys, but hand-written documents often use
/// string names, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepId {
    Int(i64),
    Name(String),
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for StepId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for StepId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for StepId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

// ---------------------------------------------------------------------------
// StepNode
// ---------------------------------------------------------------------------

/// A single step of a business process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepNode {
    /// Unique, stable identifier (referenced by dependency edges).
    pub id: StepId,
    /// Display name; also the key used by critical-path highlighting.
    pub name: String,
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub cost_per_execution: f64,
    #[serde(default = "default_one")]
    pub resource_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_limit_minutes: Option<f64>,
    #[serde(default = "default_one")]
    pub executions_per_day: u32,
}

fn default_one() -> u32 {
    1
}

impl StepNode {
    /// A step with default attributes.  Mostly useful in tests.
    pub fn new(id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_minutes: 0.0,
            cost_per_execution: 0.0,
            resource_count: 1,
            sla_limit_minutes: None,
            executions_per_day: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// DependencyEdge
// ---------------------------------------------------------------------------

/// Directed precedence edge: `source_step_id` must finish before
/// `target_step_id` starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source_step_id: StepId,
    pub target_step_id: StepId,
}

impl DependencyEdge {
    pub fn new(source: impl Into<StepId>, target: impl Into<StepId>) -> Self {
        Self {
            source_step_id: source.into(),
            target_step_id: target.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Process
// ---------------------------------------------------------------------------

/// A complete process document: steps plus their dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<StepNode>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEdge>,
}

impl Process {
    pub fn new(
        name: impl Into<String>,
        steps: Vec<StepNode>,
        dependencies: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps,
            dependencies,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout outputs
// ---------------------------------------------------------------------------

/// Node identifier → column index.
pub type LevelAssignment = HashMap<StepId, usize>;

/// Node identifier → top-left corner of the node's box.
pub type PositionMap = HashMap<StepId, Point>;

/// Cartesian coordinate on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn step_id_accepts_integers_and_strings() {
        let ids: Vec<StepId> = serde_json::from_value(json!([7, "review"])).unwrap();
        assert_eq!(ids, vec![StepId::Int(7), StepId::Name("review".into())]);
        assert_eq!(ids[0].to_string(), "7");
        assert_eq!(ids[1].to_string(), "review");
    }

    #[test]
    fn minimal_step_gets_default_attributes() {
        let step: StepNode = serde_json::from_value(json!({ "id": 1, "name": "Intake" })).unwrap();
        assert_eq!(step, StepNode::new(1_i64, "Intake"));
    }

    #[test]
    fn process_without_dependencies_parses() {
        let process: Process = serde_json::from_value(json!({
            "name": "Onboarding",
            "steps": [
                { "id": 1, "name": "Collect documents", "duration_minutes": 30.0,
                  "cost_per_execution": 12.5, "resource_count": 2,
                  "sla_limit_minutes": 45.0, "executions_per_day": 20 }
            ]
        }))
        .unwrap();

        assert!(process.dependencies.is_empty());
        assert_eq!(process.steps[0].resource_count, 2);
        assert_eq!(process.steps[0].sla_limit_minutes, Some(45.0));
    }
}
