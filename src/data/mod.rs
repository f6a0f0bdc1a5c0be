//! Synthetic dataset: random field positions, sign-derived labels, and the
//! contiguous training / validation / test split.

mod encoding;
mod generator;
mod split;

pub use encoding::{features_tensor, labels_tensor};
pub use generator::{derive_labels, generate_dataset, generate_samples, label_for, seeded_rng};
pub use split::{split_dataset, DatasetSplit, SplitSizes};

use crate::error::DatasetError;

/// Number of balls encoded per sample.
pub const BALLS: usize = 1;
/// Players per team.
pub const PLAYERS_PER_TEAM: usize = 11;
/// Every object is encoded as an (x, y, z) triplet.
pub const COORDS_PER_OBJECT: usize = 3;
/// Offset of the z coordinate inside a triplet. Always 0.0.
pub const Z_OFFSET: usize = 2;
/// Length of one sample vector: (1 + 11 + 11) * 3 = 69.
pub const FEATURE_DIM: usize = (BALLS + 2 * PLAYERS_PER_TEAM) * COORDS_PER_OBJECT;

/// Dataset layout and seeding.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub num_samples: usize,
    pub num_training_samples: usize,
    pub num_validation_samples: usize,
    pub num_test_samples: usize,
    /// Seeds data generation, shuffling and weight init. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            num_samples: 1024 * 100,
            num_training_samples: 1024 * 80,
            num_validation_samples: 1024 * 10,
            num_test_samples: 1024 * 10,
            seed: None,
        }
    }
}

impl DataConfig {
    pub fn split_sizes(&self) -> SplitSizes {
        SplitSizes {
            training: self.num_training_samples,
            validation: self.num_validation_samples,
            test: self.num_test_samples,
        }
    }
}

/// Row-major sample matrix with one label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<f32>,
    labels: Vec<f32>,
    dim: usize,
}

impl Dataset {
    pub fn new(features: Vec<f32>, labels: Vec<f32>, dim: usize) -> Result<Self, DatasetError> {
        let samples = if dim == 0 { 0 } else { features.len() / dim };
        if dim == 0 || features.len() % dim != 0 || samples != labels.len() {
            return Err(DatasetError::LengthMismatch {
                samples,
                labels: labels.len(),
            });
        }
        Ok(Dataset {
            features,
            labels,
            dim,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn sample(&self, index: usize) -> &[f32] {
        &self.features[index * self.dim..(index + 1) * self.dim]
    }

    pub fn label(&self, index: usize) -> f32 {
        self.labels[index]
    }

    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    /// Borrow the whole dataset as a slice.
    pub fn as_slice(&self) -> Slice<'_> {
        self.slice(0, self.len())
    }

    /// Borrow rows `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Slice<'_> {
        Slice {
            features: &self.features[start * self.dim..end * self.dim],
            labels: &self.labels[start..end],
            dim: self.dim,
        }
    }
}

/// A contiguous, borrowed range of a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    features: &'a [f32],
    labels: &'a [f32],
    dim: usize,
}

impl<'a> Slice<'a> {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn sample(&self, index: usize) -> &'a [f32] {
        &self.features[index * self.dim..(index + 1) * self.dim]
    }

    pub fn features(&self) -> &'a [f32] {
        self.features
    }

    pub fn labels(&self) -> &'a [f32] {
        self.labels
    }

    /// Copy the rows named by `indices` into flat feature and label buffers.
    pub fn gather(&self, indices: &[usize]) -> (Vec<f32>, Vec<f32>) {
        let mut features = Vec::with_capacity(indices.len() * self.dim);
        let mut labels = Vec::with_capacity(indices.len());
        for &i in indices {
            features.extend_from_slice(self.sample(i));
            labels.push(self.labels[i]);
        }
        (features, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_dim() {
        assert_eq!(FEATURE_DIM, 69);
    }

    #[test]
    fn test_default_split_sums_to_total() {
        let config = DataConfig::default();
        assert_eq!(config.num_samples, 102_400);
        assert_eq!(config.split_sizes().total(), config.num_samples);
    }

    #[test]
    fn test_dataset_rejects_label_mismatch() {
        let err = Dataset::new(vec![0.0; 6], vec![1.0], 3).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LengthMismatch {
                samples: 2,
                labels: 1
            }
        ));
    }

    #[test]
    fn test_slice_gather() {
        let dataset = Dataset::new(
            vec![0.0, 0.1, 1.0, 1.1, 2.0, 2.1],
            vec![0.0, 1.0, 0.0],
            2,
        )
        .unwrap();
        let slice = dataset.slice(1, 3);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.sample(0), &[1.0, 1.1]);

        let (features, labels) = slice.gather(&[1, 0]);
        assert_eq!(features, vec![2.0, 2.1, 1.0, 1.1]);
        assert_eq!(labels, vec![0.0, 1.0]);
    }
}
