//! Outbound wire types for the success and failure streams

use serde::{Deserialize, Serialize};

/// Successful prediction, written as one JSON object to standard output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class label (0 = off, 1 = on)
    pub predicted_label: i64,

    /// Probability mass the model assigned to class 1
    pub probability: f64,
}

/// Failure envelope, written as one JSON object to standard error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Wire-format error string, `<kind>:<underlying message>`
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_serialization() {
        let prediction = Prediction {
            predicted_label: 1,
            probability: 0.82,
        };

        let json = serde_json::to_string(&prediction).unwrap();
        assert_eq!(json, r#"{"predicted_label":1,"probability":0.82}"#);

        let deserialized: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, prediction);
    }

    #[test]
    fn test_error_envelope_serialization() {
        let envelope = ErrorEnvelope {
            error: "missing_field:hour".to_string(),
        };

        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"error":"missing_field:hour"}"#);
    }
}
