use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Dataset, COORDS_PER_OBJECT, FEATURE_DIM, Z_OFFSET};

/// Build the run RNG. A fixed seed makes the whole run reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draw `num_samples` row-major vectors of [`FEATURE_DIM`] values.
///
/// x and y coordinates are uniform in [-1, 1); every z coordinate is 0.0.
pub fn generate_samples<R: Rng + ?Sized>(rng: &mut R, num_samples: usize) -> Vec<f32> {
    let mut features = Vec::with_capacity(num_samples * FEATURE_DIM);
    for _ in 0..num_samples {
        for col in 0..FEATURE_DIM {
            if col % COORDS_PER_OBJECT == Z_OFFSET {
                features.push(0.0);
            } else {
                features.push(rng.random_range(-1.0f32..1.0));
            }
        }
    }
    features
}

/// 1.0 if the ball (first coordinate) is on the right half, else 0.0.
///
/// # Panics
///
/// If `sample` is empty.
pub fn label_for(sample: &[f32]) -> f32 {
    if sample[0] >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Label every row of a row-major buffer. A trailing partial row is ignored.
///
/// # Panics
///
/// If `dim` is zero.
pub fn derive_labels(features: &[f32], dim: usize) -> Vec<f32> {
    features.chunks_exact(dim).map(label_for).collect()
}

/// Generate samples and their labels in one go.
pub fn generate_dataset<R: Rng + ?Sized>(rng: &mut R, num_samples: usize) -> Dataset {
    let features = generate_samples(rng, num_samples);
    let labels = derive_labels(&features, FEATURE_DIM);
    Dataset {
        features,
        labels,
        dim: FEATURE_DIM,
    }
}
