//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to.  Nothing on the per-frame path returns an
//! error: lifecycle misuse is absorbed, so these only surface at
//! configuration and parsing boundaries.

use thiserror::Error;

/// The base error type for `cap-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown phase {0:?}")]
    UnknownPhase(String),
}

/// Shorthand result type for `cap-core`.
pub type CoreResult<T> = Result<T, CoreError>;
