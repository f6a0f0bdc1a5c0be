use burn::prelude::*;

/// Probabilities are clamped to [eps, 1 - eps] before taking logs.
pub const BCE_EPSILON: f32 = 1e-7;

/// Mean binary cross-entropy between sigmoid outputs and 0/1 targets.
pub fn binary_cross_entropy<B: Backend>(probs: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    let probs = probs.clamp(BCE_EPSILON, 1.0 - BCE_EPSILON);
    let positive = targets.clone() * probs.clone().log();
    let negative = targets.neg().add_scalar(1.0) * probs.neg().add_scalar(1.0).log();
    (positive + negative).neg().mean()
}
