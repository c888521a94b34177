//! Layout constants.

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Default node box width.
pub const NODE_WIDTH: f64 = 180.0;
/// Default node box height.
pub const NODE_HEIGHT: f64 = 60.0;
/// Default horizontal gap between columns.
pub const H_GAP: f64 = 100.0;
/// Default vertical gap between stacked nodes.
pub const V_GAP: f64 = 40.0;

/// Geometry knobs for the position assigner.
///
/// Every field is optional in a config document; missing fields keep their
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Node width `W`.
    pub node_width: f64,
    /// Node height `H`.
    pub node_height: f64,
    /// Horizontal gap `Gx` between neighbouring columns.
    pub h_gap: f64,
    /// Vertical gap `Gy` between neighbouring nodes of one column.
    pub v_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            h_gap: H_GAP,
            v_gap: V_GAP,
        }
    }
}

impl LayoutConfig {
    /// Decode a (possibly partial) JSON config document and validate it.
    pub fn from_json(content: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance between the left edges of two neighbouring columns.
    pub fn column_stride(&self) -> f64 {
        self.node_width + self.h_gap
    }

    /// Distance between the top edges of two neighbouring nodes in a column.
    pub fn row_stride(&self) -> f64 {
        self.node_height + self.v_gap
    }

    /// Reject negative or non-finite constants.
    ///
    /// # Errors
    /// [`LayoutError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let fields = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("h_gap", self.h_gap),
            ("v_gap", self.v_gap),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}
