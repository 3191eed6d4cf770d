//! Response encoding for the success and failure streams

use crate::error::PredictError;
use crate::types::response::{ErrorEnvelope, Prediction};
use std::io::{self, Write};

/// Write the success body to `out` and flush it.
///
/// One JSON object, no trailing delimiter. The failure stream stays
/// untouched; a run writes to exactly one of the two.
pub fn write_success(out: &mut impl Write, prediction: &Prediction) -> io::Result<()> {
    let body = serde_json::to_string(prediction)?;
    out.write_all(body.as_bytes())?;
    out.flush()
}

/// Write the failure envelope to `err` and flush it.
pub fn write_failure(err: &mut impl Write, error: &PredictError) -> io::Result<()> {
    let envelope = ErrorEnvelope {
        error: error.to_string(),
    };
    let body = serde_json::to_string(&envelope)?;
    err.write_all(body.as_bytes())?;
    err.flush()
}
