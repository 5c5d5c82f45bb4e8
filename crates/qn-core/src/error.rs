//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Configuration faults detected by `qn-core` types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid {distribution} parameters: {reason}")]
    InvalidParameter {
        distribution: &'static str,
        reason:       String,
    },

    #[error("sampled {what} duration {value} is negative or not finite")]
    InvalidDuration {
        what:  &'static str,
        value: f64,
    },
}

impl CoreError {
    /// Accept `value` as a duration or fail with [`CoreError::InvalidDuration`].
    pub fn check_duration(what: &'static str, value: f64) -> CoreResult<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(CoreError::InvalidDuration { what, value })
        }
    }
}

/// Shorthand result type for `qn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
