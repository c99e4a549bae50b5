//! Rendering errors.

use thiserror::Error;

use quickbill_core::DomainError;

pub type RenderResult<T> = Result<T, RenderError>;

/// Failure of one generation attempt. Never accompanied by partial output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The font family could not be registered. Fatal at startup.
    #[error("font family {family:?} could not be loaded from {dir}: {reason}")]
    Font {
        family: String,
        dir: String,
        reason: String,
    },

    /// The PDF backend refused the document.
    #[error("pdf backend: {0}")]
    Backend(String),

    /// The job was cancelled or superseded before it finished.
    #[error("render cancelled")]
    Cancelled,

    /// The background worker died without reporting a result.
    #[error("render worker: {0}")]
    Worker(String),

    /// The order was refused before anything was rendered.
    #[error("invoice rejected: {0}")]
    Rejected(#[from] DomainError),
}

impl From<genpdf::error::Error> for RenderError {
    fn from(err: genpdf::error::Error) -> Self {
        RenderError::Backend(err.to_string())
    }
}
