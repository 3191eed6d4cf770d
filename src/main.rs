//! Device-State Predictor - Main Entry Point
//!
//! Reads one JSON request from standard input, runs the embedded model,
//! and writes one JSON object to standard output (success) or standard
//! error (failure). One process handles exactly one request.

use state_predictor::{config::RuntimeConfig, error::PredictError, handler, respond};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let (config, config_err) = match RuntimeConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (RuntimeConfig::default(), Some(e)),
    };

    // Initialize logging; stdout is reserved for the response body.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Some(e) = config_err {
        warn!(error = %e, "Falling back to default configuration");
    }

    let mut body = String::new();
    let result = io::stdin()
        .read_to_string(&mut body)
        .map_err(|e| PredictError::InvalidJson(e.to_string()))
        .and_then(|_| handler::run(&body, &config));

    match result {
        Ok(prediction) => {
            if let Err(e) = respond::write_success(&mut io::stdout(), &prediction) {
                error!(error = %e, "Failed to write response");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(prediction_err) => {
            if let Err(e) = respond::write_failure(&mut io::stderr(), &prediction_err) {
                error!(error = %e, "Failed to write error envelope");
            }
            ExitCode::FAILURE
        }
    }
}
