//! Select widget configuration.
//!
//! The separate widget flavours (plain, searchable, escape-aware, with or
//! without roles) are all expressed as flags on [`SelectConfig`].

use serde::Deserialize;

use crate::error::{Result, SelectError};
use crate::window::DEFAULT_OVERSCAN;

/// Default height of one option row, in host units.
pub const DEFAULT_ITEM_HEIGHT: u16 = 40;

/// Default height of the option list viewport, in host units.
pub const DEFAULT_VIEWPORT_HEIGHT: u16 = 300;

/// Placeholder shown by the trigger while nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Configuration shared by every select flavour.
///
/// All heights are in the host's unit (terminal cells, pixels, ...). The
/// same unit must be used for the rectangles passed to
/// [`Dropdown::set_area`](crate::Dropdown::set_area).
///
/// # Example
///
/// ```ignore
/// let config = SelectConfig::from_json(r#"{ "item_height": 1, "viewport_height": 8 }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Height of a single option row.
    pub item_height: u16,
    /// Height of the scrollable option viewport.
    pub viewport_height: u16,
    /// Extra rows materialized past the visible viewport.
    pub overscan: usize,
    /// Maximum number of selected options (multi-select only).
    ///
    /// `Some(0)` is treated as unbounded.
    pub max_select: Option<usize>,
    /// Whether typing while open filters the options.
    pub searchable: bool,
    /// Whether `Escape` closes the open surface.
    pub close_on_escape: bool,
    /// Whether render descriptions carry roles.
    pub aria: bool,
    /// Trigger text while nothing is selected.
    pub placeholder: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            max_select: None,
            searchable: false,
            close_on_escape: true,
            aria: true,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl SelectConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the windowing engine depends on.
    pub fn validate(&self) -> Result<()> {
        if self.item_height == 0 {
            return Err(SelectError::ZeroItemHeight);
        }
        if self.viewport_height == 0 {
            return Err(SelectError::ZeroViewportHeight);
        }
        if self.overscan == 0 {
            return Err(SelectError::ZeroOverscan);
        }
        Ok(())
    }

    /// The effective selection cap, with `Some(0)` folded into "no cap".
    pub fn effective_max_select(&self) -> Option<usize> {
        self.max_select.filter(|&max| max > 0)
    }
}
