//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::FieldId;

/// Errors raised by `fp-core` validation and layout generation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("field {id} is invalid: {reason}")]
    InvalidField { id: FieldId, reason: String },

    #[error("layout error: {0}")]
    Layout(String),
}

/// Shorthand result type for all `fp-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
