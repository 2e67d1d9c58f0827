//! Error types for building and configuring select widgets.

use thiserror::Error;

/// Errors raised while constructing a select widget or loading its config.
///
/// Everything that can go wrong at runtime (rejected toggles, clicks on
/// empty space) is policy, not failure, so this type only appears on the
/// construction path.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The widget was built without an input surface to attach listeners to.
    #[error("{widget} must be built with an input surface")]
    MissingSurface {
        /// Name of the widget being built.
        widget: &'static str,
    },
    /// `item_height` was zero.
    #[error("item height must be greater than zero")]
    ZeroItemHeight,
    /// `viewport_height` was zero.
    #[error("viewport height must be greater than zero")]
    ZeroViewportHeight,
    /// `overscan` was zero.
    #[error("overscan must be at least one row")]
    ZeroOverscan,
    /// The configuration document could not be parsed.
    #[error("invalid select config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias for select construction.
pub type Result<T> = std::result::Result<T, SelectError>;
