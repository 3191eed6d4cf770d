//! Feature vector assembly for device-state model inference.
//!
//! Column order must match the order used when the model artifact was
//! trained. The ordering is a silent contract with the training side; it
//! is not self-describing in the artifact.

use crate::types::request::Request;

/// Feature extractor that transforms a request into the model input row.
///
/// No scaling, normalization, or missing-value handling is performed;
/// values pass through as given.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the single-row feature vector `[temperature, humidity, hour]`.
    pub fn extract(&self, request: &Request) -> Vec<f32> {
        vec![
            request.temperature as f32,
            request.humidity as f32,
            request.hour as f32,
        ]
    }

    /// Get the number of model input columns.
    pub fn feature_count(&self) -> usize {
        3
    }

    /// Get feature names in training order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec!["temperature", "humidity", "hour"]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(temperature: f64, humidity: f64, hour: f64) -> Request {
        Request {
            temperature,
            humidity,
            hour,
            model_data: String::new(),
        }
    }

    #[test]
    fn test_feature_extraction_order() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract(&request(21.5, 40.0, 13.0));

        assert_eq!(features, vec![21.5, 40.0, 13.0]);
    }

    #[test]
    fn test_order_is_not_sorted_by_value() {
        // A model sensitive to column order sees different inputs for
        // permuted readings; the extractor must never reorder them.
        let extractor = FeatureExtractor::new();

        let canonical = extractor.extract(&request(1.0, 2.0, 3.0));
        let permuted = extractor.extract(&request(3.0, 1.0, 2.0));

        assert_eq!(canonical, vec![1.0, 2.0, 3.0]);
        assert_eq!(permuted, vec![3.0, 1.0, 2.0]);
        assert_ne!(canonical, permuted);
    }

    #[test]
    fn test_feature_count() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.feature_count(), 3);
        assert_eq!(extractor.feature_names().len(), 3);
    }

    #[test]
    fn test_feature_names_match_request_columns() {
        let extractor = FeatureExtractor::new();
        assert_eq!(
            extractor.feature_names(),
            vec!["temperature", "humidity", "hour"]
        );
    }
}
