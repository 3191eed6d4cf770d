//! End-to-end handling of one inference invocation

use crate::config::RuntimeConfig;
use crate::error::PredictError;
use crate::feature_extractor::FeatureExtractor;
use crate::models::inference::InferenceEngine;
use crate::models::loader::ModelLoader;
use crate::request;
use crate::types::response::Prediction;

/// Decode the request, load the embedded model, and run one prediction.
///
/// The session and all buffers are scoped to this call; nothing survives
/// into a later invocation.
pub fn run(body: &str, config: &RuntimeConfig) -> Result<Prediction, PredictError> {
    let request = request::decode(body)?;

    let loader = ModelLoader::with_threads(config.session.intra_threads)?;
    let session = loader.load(&request.model_data)?;

    let features = FeatureExtractor::new().extract(&request);

    InferenceEngine::new(session).predict(&features)
}
