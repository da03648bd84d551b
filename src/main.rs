//! Classifies a single leaf image from the command line and prints the
//! detection as JSON. Uses the same pipeline as the HTTP server.
//!
//! Run with:
//!   cargo run --bin crop-disease -- leaf.jpg --crop-type potato

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crop_disease::config::{CONFIDENCE_THRESHOLD, DEFAULT_MODEL_PATH};
use crop_disease::{Catalog, CropType, Detector, DetectorConfig};

#[derive(Parser, Debug)]
#[command(name = "crop-disease")]
#[command(version)]
#[command(about = "Classify a crop-leaf image and print treatment guidance")]
struct Cli {
    /// Image file (PNG, JPEG, BMP or GIF)
    image: PathBuf,

    /// Crop the leaf belongs to (defaults to tomato)
    #[arg(long)]
    crop_type: Option<String>,

    /// JSON network artifact; stub predictions are used if it is missing
    #[arg(long, env = "CROP_DISEASE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Catalog JSON replacing the built-in tables
    #[arg(long, env = "CROP_DISEASE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Lower bound of the `low` severity tier
    #[arg(long, env = "CROP_DISEASE_CONFIDENCE_THRESHOLD", default_value_t = CONFIDENCE_THRESHOLD)]
    confidence_threshold: f64,
}

fn run(cli: Cli) -> crop_disease::Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load_json(path)?,
        None => Catalog::builtin(),
    };
    let config = DetectorConfig {
        model_path: cli.model_path,
        confidence_threshold: cli.confidence_threshold,
    };
    let detector = Detector::new(&config, catalog);

    let bytes = std::fs::read(&cli.image)?;
    let crop = cli.crop_type.as_deref().map(CropType::from);
    let detection = detector.detect(&bytes, crop)?;

    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
