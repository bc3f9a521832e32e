//! Chart configuration exposed to the host.
//!
//! Every field carries `#[serde(default)]`, so a partial JSON document is
//! valid and missing keys fall back to the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::error::{GanttError, Result};

/// Milliseconds in one day, the default minimum task duration.
pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Empty space surrounding a task bar inside its row, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl RowInsets {
    pub const fn same(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    pub const ZERO: Self = Self::same(0.0);
}

impl Default for RowInsets {
    fn default() -> Self {
        Self::same(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Height of a task bar, excluding the row insets.
    pub row_height: f32,
    pub row_insets: RowInsets,
    /// Shortest duration a resize may produce, in canonical units.
    pub minimum_duration: i64,
    /// Fire a change event on every drag step rather than only on release.
    pub fire_change_during_drag: bool,
    pub zoom: f64,
    /// Maximum number of undo steps kept.
    pub undo_limit: usize,
    /// Width used when the chart is not embedded in a scrollable viewport.
    pub intrinsic_width: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            row_height: 20.0,
            row_insets: RowInsets::default(),
            minimum_duration: DAY_MILLIS,
            fire_change_during_drag: true,
            zoom: 1.0,
            undo_limit: 100,
            intrinsic_width: 800.0,
        }
    }
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(GanttError::InvalidConfig(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        let insets = self.row_insets;
        if [insets.top, insets.left, insets.bottom, insets.right]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(GanttError::InvalidConfig(
                "row_insets must be finite and non-negative".to_string(),
            ));
        }
        if self.minimum_duration <= 0 {
            return Err(GanttError::InvalidConfig(format!(
                "minimum_duration must be positive, got {}",
                self.minimum_duration
            )));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(GanttError::InvalidZoom(self.zoom));
        }
        if !(self.intrinsic_width.is_finite() && self.intrinsic_width > 0.0) {
            return Err(GanttError::InvalidConfig(format!(
                "intrinsic_width must be positive, got {}",
                self.intrinsic_width
            )));
        }
        Ok(())
    }

    /// Full height of one row, insets included.
    pub fn row_stride(&self) -> f32 {
        self.row_insets.top + self.row_height + self.row_insets.bottom
    }
}
