//! Terminal error kinds for an inference invocation.

use thiserror::Error;

/// Errors that end an invocation. Each maps to one error envelope on
/// standard error and a non-zero exit status; the `Display` form is the
/// wire string callers parse.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The request body was not parseable JSON.
    #[error("invalid_json:{0}")]
    InvalidJson(String),

    /// A required request field was absent. Only the first offender is
    /// reported.
    #[error("missing_field:{0}")]
    MissingField(&'static str),

    /// Decoding the model artifact, constructing the session, or
    /// executing it failed. Wraps the underlying cause.
    #[error("inference_error:{0}")]
    Inference(String),
}

impl PredictError {
    /// Wrap any displayable cause as an inference error.
    pub fn inference(cause: impl std::fmt::Display) -> Self {
        Self::Inference(cause.to_string())
    }
}

impl From<ort::Error> for PredictError {
    fn from(err: ort::Error) -> Self {
        Self::Inference(err.to_string())
    }
}
