/// Crop disease detection HTTP service.
///
/// Served by a synchronous tiny_http server, one thread per request.
///
/// Run with:
///   cargo run --bin crop-disease-server --release
///
/// Endpoints:
///   POST /crop-disease/detect  - classify a base64 leaf image
///   POST /crop-disease/info    - remediation text for a disease name
///   GET  /crop-disease/health  - liveness probe
///   GET  /crop-disease/crops   - configured crops and label sequences

mod error;
mod handlers;
mod routes;
mod state;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tiny_http::Server;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crop_disease::config::{CONFIDENCE_THRESHOLD, DEFAULT_MODEL_PATH};
use crop_disease::{Catalog, Detector, DetectorConfig};

use state::{AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "crop-disease-server")]
#[command(version)]
#[command(about = "HTTP API for crop-leaf disease detection")]
struct Cli {
    /// Host to bind to
    #[arg(long, env = "CROP_DISEASE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CROP_DISEASE_PORT", default_value_t = 8080)]
    port: u16,

    /// JSON network artifact; stub predictions are served if it is missing
    #[arg(long, env = "CROP_DISEASE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Catalog JSON replacing the built-in crop and disease tables
    #[arg(long, env = "CROP_DISEASE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Lower bound of the `low` severity tier
    #[arg(long, env = "CROP_DISEASE_CONFIDENCE_THRESHOLD", default_value_t = CONFIDENCE_THRESHOLD)]
    confidence_threshold: f64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "CROP_DISEASE_MAX_BODY_BYTES", default_value_t = 16 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Load the model at startup instead of on the first detect request
    #[arg(long)]
    preload: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let catalog = match &cli.catalog {
        Some(path) => match Catalog::load_json(path) {
            Ok(c) => c,
            Err(e) => {
                error!("failed to load catalog {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Catalog::builtin(),
    };

    let detector_config = DetectorConfig {
        model_path: cli.model_path,
        confidence_threshold: cli.confidence_threshold,
    };
    let server_config = ServerConfig {
        host: cli.host,
        port: cli.port,
        max_body_bytes: cli.max_body_bytes,
    };

    info!("crop-disease-server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Model path:           {:?}", detector_config.model_path);
    info!("  Confidence threshold: {}", detector_config.confidence_threshold);
    info!("  Crops:                {}", catalog.crops().len());

    let detector = Detector::new(&detector_config, catalog);
    if cli.preload && !detector.warm_up() {
        warn!("no model loaded at startup; detect requests will return stub predictions");
    }

    let addr = format!("{}:{}", server_config.host, server_config.port);
    let server = match Server::http(&addr) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("listening on http://{}", addr);

    let state = Arc::new(AppState::new(detector, server_config));
    routes::serve(server, state);
    ExitCode::SUCCESS
}
