//! End-to-end run: generate, split, build, train, evaluate, save.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use burn::module::AutodiffModule;
use burn::prelude::*;
use tracing::info;

use crate::config::AppConfig;
use crate::data::{generate_dataset, seeded_rng, split_dataset};
use crate::error::TrainingError;
use crate::model::TrainBackend;
use crate::persist::{save_model, ModelMetadata, NetworkArchitecture};
use crate::training::metrics::{EvalMetrics, TrainingHistory};
use crate::training::trainer::{evaluate, Trainer};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub history: TrainingHistory,
    pub test: EvalMetrics,
    pub test_samples: usize,
    pub weights_path: PathBuf,
}

pub fn run(config: &AppConfig) -> Result<RunReport, TrainingError> {
    config.validate()?;

    let mut rng = seeded_rng(config.data.seed);
    if let Some(seed) = config.data.seed {
        TrainBackend::seed(seed);
    }
    let device = Default::default();

    info!(samples = config.data.num_samples, "generating dataset");
    let dataset = generate_dataset(&mut rng, config.data.num_samples);
    let split = split_dataset(&dataset, config.data.split_sizes())?;

    let network_config = config.network.to_config();
    let model = network_config.init::<TrainBackend>(&device);
    println!("{}", model.summary());

    let trainer = Trainer::new(config.training.clone());
    let (model, history) =
        trainer.fit(model, &split.training, &split.validation, &mut rng, &device);
    let model = model.valid();

    let test = evaluate(&model, &split.test, config.training.batch_size);
    info!(loss = test.loss, accuracy = test.accuracy, "test evaluation");
    println!(
        "Test accuracy on {} new samples: {}",
        split.test.len(),
        test.accuracy
    );

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let metadata = ModelMetadata {
        architecture: NetworkArchitecture::from_config(&network_config),
        epochs: config.training.epochs,
        batch_size: config.training.batch_size,
        learning_rate: config.training.learning_rate,
        seed: config.data.seed,
        timestamp,
        test_metrics: Some(test),
    };
    let weights_path = save_model(&model, &metadata, &config.output.save_path)?;
    println!("Saved model to {}", weights_path.display());

    Ok(RunReport {
        history,
        test,
        test_samples: split.test.len(),
        weights_path,
    })
}
