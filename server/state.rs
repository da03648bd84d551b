use std::sync::Arc;

use crop_disease::Detector;

/// HTTP-level settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Everything a request handler can see. Immutable after startup apart
/// from the detector's one-time model load, so no lock is needed.
#[derive(Debug)]
pub struct AppState {
    pub detector: Detector,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(detector: Detector, config: ServerConfig) -> Self {
        AppState { detector, config }
    }
}

/// Shared state type: an `Arc<AppState>` handed to every request thread.
pub type SharedState = Arc<AppState>;
