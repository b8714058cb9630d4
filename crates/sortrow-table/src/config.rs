#![forbid(unsafe_code)]

//! Table configuration.
//!
//! Hosts typically build this in code with the builder methods, or load it
//! from JSON alongside the rest of their UI settings. Missing fields take
//! their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortrow_core::transition::Easing;

use crate::ledger::ReflowStyle;
use crate::table::TableError;

/// Default uniform row height in pixels.
pub const DEFAULT_ROW_HEIGHT: u32 = 20;
/// Default table width in pixels.
pub const DEFAULT_WIDTH: u32 = 320;
/// Default duration of the sibling reflow glide.
pub const DEFAULT_REFLOW_MS: u64 = 150;

/// Geometry and behavior of a [`Table`](crate::Table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Uniform row height in pixels.
    pub row_height: u32,
    /// Table (and row) width in pixels.
    pub width: u32,
    /// Header height; `None` means "same as a row".
    pub header_height: Option<u32>,
    /// Duration of the sibling reflow glide.
    pub reflow_duration_ms: u64,
    /// Curve of the sibling reflow glide.
    pub easing: Easing,
    /// Whether rows added with [`Table::add_row`](crate::Table::add_row) can be dragged.
    pub rows_draggable: bool,
    /// Whether a single-finger touch may start a drag.
    pub allow_touch: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            width: DEFAULT_WIDTH,
            header_height: None,
            reflow_duration_ms: DEFAULT_REFLOW_MS,
            easing: Easing::default(),
            rows_draggable: true,
            allow_touch: true,
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_header_height(mut self, header_height: u32) -> Self {
        self.header_height = Some(header_height);
        self
    }

    #[must_use]
    pub fn with_reflow(mut self, duration: Duration, easing: Easing) -> Self {
        self.reflow_duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.easing = easing;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.row_height == 0 || self.row_height > i32::MAX as u32 {
            return Err(TableError::InvalidRowHeight {
                row_height: self.row_height,
            });
        }
        if self.width == 0 || self.width > i32::MAX as u32 {
            return Err(TableError::InvalidWidth { width: self.width });
        }
        match self.header_height {
            Some(height) if height == 0 || height > i32::MAX as u32 => {
                Err(TableError::InvalidHeaderHeight { height })
            }
            _ => Ok(()),
        }
    }

    /// Header height in effect once a header exists.
    #[must_use]
    pub fn effective_header_height(&self) -> u32 {
        self.header_height.unwrap_or(self.row_height)
    }

    /// Reflow glide parameters.
    #[must_use]
    pub fn reflow(&self) -> ReflowStyle {
        ReflowStyle {
            duration: Duration::from_millis(self.reflow_duration_ms),
            easing: self.easing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(TableConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_extents_are_rejected() {
        assert_eq!(
            TableConfig::default().with_row_height(0).validate(),
            Err(TableError::InvalidRowHeight { row_height: 0 })
        );
        assert_eq!(
            TableConfig::default().with_width(0).validate(),
            Err(TableError::InvalidWidth { width: 0 })
        );
        assert_eq!(
            TableConfig::default().with_header_height(0).validate(),
            Err(TableError::InvalidHeaderHeight { height: 0 })
        );
    }

    #[test]
    fn loads_partial_json_with_defaults() {
        let config: TableConfig =
            serde_json::from_str(r#"{"row_height": 24, "header_height": 30, "easing": "linear"}"#)
                .expect("valid table config json");
        assert_eq!(config.row_height, 24);
        assert_eq!(config.effective_header_height(), 30);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.reflow().easing, Easing::Linear);
        assert_eq!(
            config.reflow().duration,
            Duration::from_millis(DEFAULT_REFLOW_MS)
        );
    }

    #[test]
    fn header_defaults_to_row_height() {
        let config = TableConfig::default().with_row_height(18);
        assert_eq!(config.effective_header_height(), 18);
    }
}
