//! `layout` crate — layered DAG layout for process-step graphs.
//!
//! Levels steps by longest dependency path, places them in columns, and
//! attaches bottleneck / critical-path style flags for the rendering surface.

pub mod models;
pub mod error;
pub mod config;
pub mod dag;
pub mod position;
pub mod highlight;
pub mod pipeline;

pub use models::{DependencyEdge, LevelAssignment, Point, PositionMap, Process, StepId, StepNode};
pub use error::LayoutError;
pub use config::LayoutConfig;
pub use dag::{level, level_report, Leveling};
pub use position::{place, place_with};
pub use highlight::{annotate, AnalysisSummary, Highlights};
pub use pipeline::{layout_process, ProcessLayout};
