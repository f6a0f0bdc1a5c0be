/// Decision threshold on the sigmoid output.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Number of predictions that land on the same side of 0.5 as their label.
pub fn count_correct(probs: &[f32], labels: &[f32]) -> usize {
    probs
        .iter()
        .zip(labels)
        .filter(|(p, y)| (**p >= DECISION_THRESHOLD) == (**y >= DECISION_THRESHOLD))
        .count()
}

/// Sample-weighted running loss and accuracy over one pass.
#[derive(Debug, Clone, Default)]
pub struct PassAccumulator {
    loss_sum: f64,
    correct: usize,
    samples: usize,
}

impl PassAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one batch: its mean loss, predictions and labels.
    pub fn record_batch(&mut self, mean_loss: f32, probs: &[f32], labels: &[f32]) {
        self.loss_sum += mean_loss as f64 * labels.len() as f64;
        self.correct += count_correct(probs, labels);
        self.samples += labels.len();
    }

    pub fn finish(&self) -> EvalMetrics {
        if self.samples == 0 {
            return EvalMetrics::default();
        }
        EvalMetrics {
            loss: (self.loss_sum / self.samples as f64) as f32,
            accuracy: self.correct as f32 / self.samples as f32,
            samples: self.samples,
        }
    }
}

/// Loss and accuracy over one slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EvalMetrics {
    pub loss: f32,
    pub accuracy: f32,
    pub samples: usize,
}

/// Metrics reported at the end of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub training: EvalMetrics,
    pub validation: EvalMetrics,
    pub elapsed_ms: u128,
}

impl EpochMetrics {
    pub fn is_finite(&self) -> bool {
        self.training.loss.is_finite() && self.validation.loss.is_finite()
    }
}

/// Per-epoch history of a training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingHistory {
    epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochMetrics> {
        self.epochs.iter()
    }

    /// True if any epoch produced a NaN or infinite loss.
    pub fn diverged(&self) -> bool {
        self.epochs.iter().any(|m| !m.is_finite())
    }

    /// Epoch with the highest validation accuracy.
    pub fn best_validation(&self) -> Option<&EpochMetrics> {
        self.epochs.iter().max_by(|a, b| {
            a.validation
                .accuracy
                .partial_cmp(&b.validation.accuracy)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
