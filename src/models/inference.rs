//! Single-shot model execution and output normalization

use crate::error::PredictError;
use crate::models::outputs::{self, POSITIVE_CLASS};
use crate::types::response::Prediction;
use ort::session::Session;
use ort::value::DynValue;
use tracing::debug;

/// Input tensor name pinned by the model export contract.
pub const INPUT_NAME: &str = "input";

/// Inference engine bound to one loaded session.
///
/// The session lives for exactly one prediction; the engine is
/// constructed at the start of the handler and dropped at its end.
pub struct InferenceEngine {
    session: Session,
}

impl InferenceEngine {
    /// Create an engine around a ready-to-run session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Run the graph on one feature row and normalize its outputs.
    ///
    /// Outputs are taken positionally: the first is the label tensor, the
    /// second the probability structure.
    pub fn predict(&mut self, features: &[f32]) -> Result<Prediction, PredictError> {
        use ort::value::Tensor;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .map_err(|e| PredictError::Inference(format!("failed to create input tensor: {e}")))?;

        let session_outputs = self.session.run(ort::inputs![INPUT_NAME => input_tensor])?;

        let mut ordered = session_outputs.iter();
        let (label_name, label_output) = ordered
            .next()
            .ok_or_else(|| PredictError::inference("model produced no outputs"))?;
        let (prob_name, prob_output) = ordered.next().ok_or_else(|| {
            PredictError::inference("model produced one output, expected label and probabilities")
        })?;

        let predicted_label = extract_label(&label_output)?;
        let prob_shape = outputs::classify(&prob_output);
        let probability = outputs::probability_for_class(&prob_shape, POSITIVE_CLASS);

        debug!(
            label = predicted_label,
            probability,
            label_output = %label_name,
            prob_output = %prob_name,
            "Outputs normalized"
        );

        Ok(Prediction {
            predicted_label,
            probability,
        })
    }
}

/// Integer value of the first element of the label output.
///
/// No bounds or range validation beyond the numeric cast; an empty label
/// tensor is an execution error.
fn extract_label(value: &DynValue) -> Result<i64, PredictError> {
    if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
        return first_label(data.iter().copied());
    }
    if let Ok((_, data)) = value.try_extract_tensor::<i32>() {
        return first_label(data.iter().map(|&v| v as i64));
    }
    if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
        return first_label(data.iter().map(|&v| v as i64));
    }

    Err(PredictError::inference("unsupported label output type"))
}

fn first_label(mut values: impl Iterator<Item = i64>) -> Result<i64, PredictError> {
    values
        .next()
        .ok_or_else(|| PredictError::inference("empty label output"))
}
