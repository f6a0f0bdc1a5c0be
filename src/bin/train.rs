#![recursion_limit = "256"]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use ball_field_side::config::AppConfig;
use ball_field_side::logging;
use ball_field_side::pipeline;

/// Train the ball field side classifier on synthetic positions.
#[derive(Parser)]
#[command(name = "train", about = "Train the ball field side classifier")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Override mini-batch size
    #[arg(long)]
    batch_size: Option<usize>,

    /// Seed data generation, shuffling and weight init
    #[arg(long)]
    seed: Option<u64>,

    /// Override where the model is saved (without extension)
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Log per-batch detail
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(epochs) = cli.epochs {
        app_config.training.epochs = epochs;
    }
    if let Some(batch_size) = cli.batch_size {
        app_config.training.batch_size = batch_size;
    }
    if let Some(seed) = cli.seed {
        app_config.data.seed = Some(seed);
    }
    if let Some(save_path) = cli.save_path {
        app_config.output.save_path = save_path;
    }

    info!(
        epochs = app_config.training.epochs,
        batch_size = app_config.training.batch_size,
        seed = ?app_config.data.seed,
        save_path = %app_config.output.save_path.display(),
        "starting run"
    );

    let report = pipeline::run(&app_config).context("training run failed")?;
    if let Some(best) = report.history.best_validation() {
        info!(
            epoch = best.epoch,
            val_accuracy = best.validation.accuracy,
            val_loss = best.validation.loss,
            "best validation epoch"
        );
    }
    if report.history.diverged() {
        warn!("loss became non-finite during training, the saved model is unreliable");
    }
    Ok(())
}
