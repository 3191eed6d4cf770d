//! ONNX model loader for embedded artifacts

use crate::error::PredictError;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::{builder::GraphOptimizationLevel, Session};
use tracing::{debug, info};

/// Loader for model graphs delivered inline as base64 bytes.
///
/// Every invocation constructs its own session and drops it with the
/// handler; there is no pooling or cross-invocation reuse.
pub struct ModelLoader {
    /// Number of intra-op threads for session execution
    intra_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread).
    pub fn new() -> Result<Self, PredictError> {
        Self::with_threads(1)
    }

    /// Create a new model loader with the specified number of threads.
    pub fn with_threads(intra_threads: usize) -> Result<Self, PredictError> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        debug!(intra_threads, "ONNX Runtime initialized");
        Ok(Self { intra_threads })
    }

    /// Decode the base64 model payload and build a ready-to-run session.
    ///
    /// Execution is pinned to the CPU provider; device selection must be
    /// deterministic and must not emit accelerator diagnostics on the
    /// error stream.
    pub fn load(&self, model_data: &str) -> Result<Session, PredictError> {
        let model_bytes = decode_model_bytes(model_data)?;

        let session = Session::builder()?
            .with_execution_providers([CPUExecutionProvider::default().build()])?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.intra_threads)?
            .commit_from_memory(&model_bytes)?;

        info!(
            model_bytes = model_bytes.len(),
            inputs = session.inputs.len(),
            outputs = session.outputs.len(),
            "Model session constructed"
        );

        Ok(session)
    }
}

/// Decode the standard-base64 model payload into raw graph bytes.
fn decode_model_bytes(model_data: &str) -> Result<Vec<u8>, PredictError> {
    BASE64_STANDARD
        .decode(model_data)
        .map_err(|e| PredictError::Inference(format!("failed to decode model_data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_model_bytes() {
        let bytes = decode_model_bytes("aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_model_bytes_rejects_malformed_base64() {
        let err = decode_model_bytes("not valid base64!").unwrap_err();

        assert!(matches!(err, PredictError::Inference(_)));
        assert!(err.to_string().starts_with("inference_error:"));
    }

    #[test]
    fn test_decode_model_bytes_rejects_urlsafe_alphabet() {
        // Standard alphabet only; '-' and '_' are not part of the contract.
        assert!(decode_model_bytes("a-b_").is_err());
    }
}
