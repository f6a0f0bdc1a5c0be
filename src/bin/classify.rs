#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use ball_field_side::detect::{BallFieldSideDetector, FieldSnapshot};
use ball_field_side::logging;
use ball_field_side::model::InferBackend;
use ball_field_side::persist::load_model;

/// Classify field snapshots with a trained model and print every side change.
#[derive(Parser)]
#[command(name = "classify", about = "Detect which half of the field the ball is on")]
struct Cli {
    /// Saved model path without extension
    #[arg(long, default_value = "models/ball_field_side")]
    model: PathBuf,

    /// JSON file holding an array of field snapshots
    #[arg(long)]
    input: PathBuf,

    /// Log debug detail
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let device = Default::default();
    let (model, metadata) = load_model::<InferBackend>(&cli.model, &device)
        .with_context(|| format!("loading model from {}", cli.model.display()))?;
    info!(
        hidden_size = metadata.architecture.hidden_size,
        epochs = metadata.epochs,
        "model loaded"
    );

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let snapshots: Vec<FieldSnapshot> = serde_json::from_str(&content)
        .with_context(|| format!("parsing snapshots from {}", cli.input.display()))?;

    let mut detector = BallFieldSideDetector::new(model);
    for snapshot in &snapshots {
        match detector.process(snapshot) {
            Ok(Some(state)) => println!("{}", serde_json::to_string(&state)?),
            Ok(None) => {}
            Err(e) => error!(match_id = %snapshot.match_id, "{e}"),
        }
    }
    Ok(())
}
