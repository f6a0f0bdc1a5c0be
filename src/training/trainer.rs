use std::time::Instant;

use burn::module::AutodiffModule;
use burn::optim::{GradientsParams, Optimizer, RmsPropConfig};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::ElementConversion;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::data::{features_tensor, labels_tensor, Slice};
use crate::model::{binary_cross_entropy, BallFieldSideNetwork};
use crate::training::metrics::{EpochMetrics, EvalMetrics, PassAccumulator, TrainingHistory};

/// Trainer configuration. Optimizer defaults match Keras' `rmsprop`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// RMSprop decay of the squared-gradient average.
    pub rho: f32,
    pub epsilon: f32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            epochs: 20,
            batch_size: 512,
            learning_rate: 1e-3,
            rho: 0.9,
            epsilon: 1e-7,
        }
    }
}

/// Mini-batch RMSprop trainer for the ball field side network.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Train for the configured number of epochs.
    ///
    /// Each epoch shuffles the training order with `rng`, steps over the
    /// mini-batches and then scores the validation slice. Validation never
    /// feeds back into the parameters. A NaN loss is logged and training
    /// carries on; callers can check [`TrainingHistory::diverged`].
    pub fn fit<B: AutodiffBackend, R: Rng + ?Sized>(
        &self,
        mut model: BallFieldSideNetwork<B>,
        training: &Slice<'_>,
        validation: &Slice<'_>,
        rng: &mut R,
        device: &B::Device,
    ) -> (BallFieldSideNetwork<B>, TrainingHistory) {
        let mut optimizer = RmsPropConfig::new()
            .with_alpha(self.config.rho)
            .with_epsilon(self.config.epsilon)
            .init();
        let mut history = TrainingHistory::new();
        let mut order: Vec<usize> = (0..training.len()).collect();
        let batch_size = self.config.batch_size.max(1);

        info!(
            samples = training.len(),
            validation_samples = validation.len(),
            epochs = self.config.epochs,
            batch_size,
            "starting training"
        );

        for epoch in 1..=self.config.epochs {
            let start = Instant::now();
            order.shuffle(rng);
            let mut pass = PassAccumulator::new();

            for (step, batch) in order.chunks(batch_size).enumerate() {
                let (features, labels) = training.gather(batch);
                let inputs = features_tensor::<B>(&features, training.dim(), device);
                let targets = labels_tensor::<B>(&labels, device);

                let probs = model.forward(inputs);
                let loss = binary_cross_entropy(probs.clone(), targets);
                let loss_val: f32 = loss.clone().into_scalar().elem();
                let prob_vec: Vec<f32> = probs.into_data().iter::<f32>().collect();

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optimizer.step(self.config.learning_rate, model, grads);

                pass.record_batch(loss_val, &prob_vec, &labels);
                debug!(epoch, step, loss = loss_val, "batch");
            }

            let train_metrics = pass.finish();
            let val_metrics = evaluate(&model.valid(), validation, batch_size);
            let metrics = EpochMetrics {
                epoch,
                training: train_metrics,
                validation: val_metrics,
                elapsed_ms: start.elapsed().as_millis(),
            };

            println!(
                "Epoch {}/{} - {}ms - loss: {:.4} - accuracy: {:.4} - val_loss: {:.4} - val_accuracy: {:.4}",
                epoch,
                self.config.epochs,
                metrics.elapsed_ms,
                train_metrics.loss,
                train_metrics.accuracy,
                val_metrics.loss,
                val_metrics.accuracy,
            );
            if !metrics.is_finite() {
                warn!(epoch, "loss is not finite, weights are likely corrupted");
            }
            history.record(metrics);
        }

        (model, history)
    }
}

/// Score `slice` in contiguous batches. Pure inference, no parameter updates.
pub fn evaluate<B: Backend>(
    model: &BallFieldSideNetwork<B>,
    slice: &Slice<'_>,
    batch_size: usize,
) -> EvalMetrics {
    let mut pass = PassAccumulator::new();
    let dim = slice.dim();
    let batch_size = batch_size.max(1);
    let device = model.device();

    for (features, labels) in slice
        .features()
        .chunks(batch_size * dim)
        .zip(slice.labels().chunks(batch_size))
    {
        let probs = model.forward(features_tensor::<B>(features, dim, &device));
        let loss = binary_cross_entropy(probs.clone(), labels_tensor::<B>(labels, &device));
        let prob_vec: Vec<f32> = probs.into_data().iter::<f32>().collect();
        pass.record_batch(loss.into_scalar().elem(), &prob_vec, labels);
    }

    pass.finish()
}
