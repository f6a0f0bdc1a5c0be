use burn::prelude::*;
use burn::tensor::TensorData;

/// Encode a flat row-major buffer as a `[rows, dim]` tensor.
///
/// # Panics
///
/// If `dim` is zero or does not divide `features.len()`.
pub fn features_tensor<B: Backend>(features: &[f32], dim: usize, device: &B::Device) -> Tensor<B, 2> {
    let rows = features.len() / dim;
    Tensor::from_data(TensorData::new(features.to_vec(), [rows, dim]), device)
}

/// Encode labels as a `[rows, 1]` tensor so they line up with the sigmoid output.
pub fn labels_tensor<B: Backend>(labels: &[f32], device: &B::Device) -> Tensor<B, 2> {
    Tensor::from_data(TensorData::new(labels.to_vec(), [labels.len(), 1]), device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_features_tensor_shape_and_values() {
        let device = Default::default();
        let tensor = features_tensor::<TestBackend>(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, &device);
        assert_eq!(tensor.shape().dims, [2, 3]);
        let data: Vec<f32> = tensor.into_data().iter::<f32>().collect();
        assert_eq!(data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_labels_tensor_shape() {
        let device = Default::default();
        let tensor = labels_tensor::<TestBackend>(&[0.0, 1.0, 1.0], &device);
        assert_eq!(tensor.shape().dims, [3, 1]);
    }
}
