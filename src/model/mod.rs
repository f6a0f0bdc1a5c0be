//! The ball field side network and the backends it trains and runs on.

mod loss;
mod network;

pub use loss::{binary_cross_entropy, BCE_EPSILON};
pub use network::{BallFieldSideNetwork, BallFieldSideNetworkConfig};

use burn::backend::{Autodiff, NdArray};

use crate::data::FEATURE_DIM;

pub type InferBackend = NdArray<f32>;
pub type TrainBackend = Autodiff<InferBackend>;

/// The `[network]` section of the app config.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub hidden_size: usize,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        NetworkSettings { hidden_size: 64 }
    }
}

impl NetworkSettings {
    pub fn to_config(&self) -> BallFieldSideNetworkConfig {
        BallFieldSideNetworkConfig::new()
            .with_input_size(FEATURE_DIM)
            .with_hidden_size(self.hidden_size)
    }
}
