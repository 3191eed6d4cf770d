//! Inbound request for a single device-state prediction

use serde::{Deserialize, Serialize};

/// One inference request, delivered whole on standard input.
///
/// All four fields are mandatory; there are no defaults. Values are
/// passed to the model as given, in the units the model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Latest temperature reading for the device
    pub temperature: f64,

    /// Latest relative humidity reading for the device
    pub humidity: f64,

    /// Hour of day (0-23) the reading was taken
    pub hour: f64,

    /// Base64-encoded serialized model graph trained for this device
    pub model_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{"temperature":21.5,"humidity":40,"hour":13,"model_data":"AAAA"}"#;
        let request: Request = serde_json::from_str(json).unwrap();

        assert_eq!(request.temperature, 21.5);
        assert_eq!(request.humidity, 40.0);
        assert_eq!(request.hour, 13.0);
        assert_eq!(request.model_data, "AAAA");
    }

    #[test]
    fn test_request_ignores_extra_fields() {
        let json = r#"{"temperature":1,"humidity":2,"hour":3,"model_data":"x","device_id":"d1"}"#;
        let request: Request = serde_json::from_str(json).unwrap();

        assert_eq!(request.hour, 3.0);
    }
}
