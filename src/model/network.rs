use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;
use burn::tensor::activation::sigmoid;

use crate::data::features_tensor;

/// Two-layer classifier over one flattened field snapshot.
///
/// ```text
/// Input:   [batch, 69]
/// Hidden:  69 -> 64, ReLU
/// Output:  64 -> 1, sigmoid  (probability the ball is on the right half)
/// ```
#[derive(Module, Debug)]
pub struct BallFieldSideNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
    relu: Relu,
}

#[derive(Config, Debug)]
pub struct BallFieldSideNetworkConfig {
    #[config(default = 69)]
    pub input_size: usize,
    #[config(default = 64)]
    pub hidden_size: usize,
}

impl BallFieldSideNetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BallFieldSideNetwork<B> {
        BallFieldSideNetwork {
            hidden: LinearConfig::new(self.input_size, self.hidden_size).init(device),
            output: LinearConfig::new(self.hidden_size, 1).init(device),
            relu: Relu::new(),
        }
    }
}

impl<B: Backend> BallFieldSideNetwork<B> {
    /// Forward pass: [batch, input_size] -> [batch, 1] probabilities.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.relu.forward(self.hidden.forward(input));
        sigmoid(self.output.forward(x))
    }

    pub fn input_size(&self) -> usize {
        self.hidden.weight.val().dims()[0]
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.weight.val().dims()[1]
    }

    /// Device the weights live on.
    pub fn device(&self) -> B::Device {
        self.hidden.weight.val().device()
    }

    /// Probabilities for a flat row-major batch of samples.
    ///
    /// # Panics
    ///
    /// If `features.len()` is not a multiple of [`Self::input_size`].
    pub fn predict(&self, features: &[f32]) -> Vec<f32> {
        let input = features_tensor::<B>(features, self.input_size(), &self.device());
        self.forward(input).into_data().iter::<f32>().collect()
    }

    /// Layer table in the shape of a Keras `model.summary()`.
    pub fn summary(&self) -> String {
        let rule = "_".repeat(65);
        let double_rule = "=".repeat(65);
        let hidden_params = self.hidden.num_params();
        let output_params = self.output.num_params();

        let mut out = String::new();
        out.push_str("Model: \"ball_field_side\"\n");
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            " {:<27} {:<25} {}\n",
            "Layer (type)", "Output Shape", "Param #"
        ));
        out.push_str(&double_rule);
        out.push('\n');
        out.push_str(&format!(
            " {:<27} {:<25} {}\n",
            "dense (Dense, relu)",
            format!("(None, {})", self.hidden_size()),
            hidden_params
        ));
        out.push_str(&format!(
            " {:<27} {:<25} {}\n",
            "dense_1 (Dense, sigmoid)", "(None, 1)", output_params
        ));
        out.push_str(&double_rule);
        out.push('\n');
        out.push_str(&format!("Total params: {}\n", self.num_params()));
        out.push_str(&rule);
        out
    }
}
