//! Tunable window-manager constants, loadable from TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Size, Viewport};

/// Delay after which a double-tap no longer counts.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowManagerConfig {
    /// Minimum window size on desktop viewports.
    pub min_size: Size,
    /// Minimum window size on compact viewports.
    pub compact_min_size: Size,
    /// Viewports narrower than this width use compact sizing.
    pub compact_breakpoint: f64,
    /// Height reserved for the taskbar at the bottom of the viewport.
    pub taskbar_height: f64,
    /// Pointer travel in px before a title-bar press turns into a drag.
    pub drag_threshold: f64,
    pub preview_show_delay_ms: u64,
    pub preview_hide_delay_ms: u64,
    /// Folder ids whose file-explorer windows are mirrored into `?folder=`.
    pub main_folders: Vec<String>,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_size: Size::new(300.0, 200.0),
            compact_min_size: Size::new(250.0, 150.0),
            compact_breakpoint: 768.0,
            taskbar_height: 48.0,
            drag_threshold: 3.0,
            preview_show_delay_ms: 500,
            preview_hide_delay_ms: 200,
            main_folders: vec![
                "desktop-aboutme".to_string(),
                "desktop-projects".to_string(),
                "desktop-experience".to_string(),
                "desktop-contact".to_string(),
            ],
        }
    }
}

impl WindowManagerConfig {
    /// Parses and validates a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_size(self.min_size) {
            return Err(ConfigError::OutOfRange {
                field: "min_size",
                reason: "width and height must be positive",
            });
        }
        if !positive_size(self.compact_min_size) {
            return Err(ConfigError::OutOfRange {
                field: "compact_min_size",
                reason: "width and height must be positive",
            });
        }
        if !(self.compact_breakpoint.is_finite() && self.compact_breakpoint > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "compact_breakpoint",
                reason: "must be positive",
            });
        }
        if !(self.taskbar_height.is_finite() && self.taskbar_height > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "taskbar_height",
                reason: "must be positive",
            });
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "drag_threshold",
                reason: "must be zero or positive",
            });
        }
        Ok(())
    }

    /// Minimum window size for the given viewport class.
    pub fn min_size_for(&self, viewport: Viewport) -> Size {
        if self.is_compact(viewport) {
            self.compact_min_size
        } else {
            self.min_size
        }
    }

    pub fn is_compact(&self, viewport: Viewport) -> bool {
        viewport.is_compact(self.compact_breakpoint)
    }

    pub fn preview_show_delay(&self) -> Duration {
        Duration::from_millis(self.preview_show_delay_ms)
    }

    pub fn preview_hide_delay(&self) -> Duration {
        Duration::from_millis(self.preview_hide_delay_ms)
    }
}

fn positive_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
