//! Request decoding and validation

use crate::error::PredictError;
use crate::types::request::Request;
use serde_json::Value;

/// Required request fields, checked in this order. Validation stops at
/// the first missing field.
pub const REQUIRED_FIELDS: [&str; 4] = ["temperature", "humidity", "hour", "model_data"];

/// Decode a raw request body into a typed [`Request`].
///
/// The body must be one JSON object. Parse failures are `invalid_json`;
/// an absent required field is `missing_field`. A present field of the
/// wrong type is deferred to the execution phase and reported as
/// `inference_error`.
pub fn decode(body: &str) -> Result<Request, PredictError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| PredictError::InvalidJson(e.to_string()))?;

    for field in REQUIRED_FIELDS {
        if value.get(field).is_none() {
            return Err(PredictError::MissingField(field));
        }
    }

    serde_json::from_value(value).map_err(PredictError::inference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> Value {
        serde_json::json!({
            "temperature": 21.5,
            "humidity": 40,
            "hour": 13,
            "model_data": "AAAA"
        })
    }

    #[test]
    fn test_decode_valid_request() {
        let request = decode(&full_request().to_string()).unwrap();

        assert_eq!(request.temperature, 21.5);
        assert_eq!(request.humidity, 40.0);
        assert_eq!(request.hour, 13.0);
        assert_eq!(request.model_data, "AAAA");
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode("not json").unwrap_err();
        assert!(matches!(err, PredictError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid_json:"));
    }

    #[test]
    fn test_decode_reports_each_missing_field() {
        for field in REQUIRED_FIELDS {
            let mut value = full_request();
            value.as_object_mut().unwrap().remove(field);

            let err = decode(&value.to_string()).unwrap_err();
            assert_eq!(err.to_string(), format!("missing_field:{field}"));
        }
    }

    #[test]
    fn test_decode_reports_first_missing_field_only() {
        // humidity and hour both absent: only humidity is named.
        let body = r#"{"temperature":1.0,"model_data":"AAAA"}"#;

        let err = decode(body).unwrap_err();
        assert_eq!(err.to_string(), "missing_field:humidity");
    }

    #[test]
    fn test_decode_non_object_body() {
        let err = decode("[1,2,3]").unwrap_err();
        assert_eq!(err.to_string(), "missing_field:temperature");
    }

    #[test]
    fn test_decode_defers_type_mismatch_to_inference() {
        let mut value = full_request();
        value["model_data"] = serde_json::json!(42);

        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
    }
}
