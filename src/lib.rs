//! Device-State Predictor Library
//!
//! Single-shot classification inference: decode one JSON request, execute
//! the embedded ONNX model graph, and normalize its heterogeneous output
//! shapes into a stable label/probability response.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod handler;
pub mod models;
pub mod request;
pub mod respond;
pub mod types;

pub use config::RuntimeConfig;
pub use error::PredictError;
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use models::loader::ModelLoader;
pub use types::{request::Request, response::Prediction};
