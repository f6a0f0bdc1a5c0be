use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::model::BallFieldSideNetworkConfig;
use crate::training::metrics::EvalMetrics;

pub const RELU: &str = "relu";
pub const SIGMOID: &str = "sigmoid";

/// Layer widths and activations, enough to rebuild the network before
/// loading its weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkArchitecture {
    pub input_size: usize,
    pub hidden_size: usize,
    pub hidden_activation: String,
    pub output_size: usize,
    pub output_activation: String,
}

impl NetworkArchitecture {
    pub fn from_config(config: &BallFieldSideNetworkConfig) -> Self {
        NetworkArchitecture {
            input_size: config.input_size,
            hidden_size: config.hidden_size,
            hidden_activation: RELU.to_string(),
            output_size: 1,
            output_activation: SIGMOID.to_string(),
        }
    }

    /// Network config for this architecture. Only relu → sigmoid with a single
    /// output unit can be rebuilt.
    pub fn to_config(&self) -> Result<BallFieldSideNetworkConfig, PersistError> {
        if self.hidden_activation != RELU
            || self.output_activation != SIGMOID
            || self.output_size != 1
        {
            return Err(PersistError::ModelLoad(format!(
                "unsupported architecture: {} -> {} ({}) -> {} ({})",
                self.input_size,
                self.hidden_size,
                self.hidden_activation,
                self.output_size,
                self.output_activation
            )));
        }
        Ok(BallFieldSideNetworkConfig::new()
            .with_input_size(self.input_size)
            .with_hidden_size(self.hidden_size))
    }
}

/// Run details stored next to the weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub architecture: NetworkArchitecture,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_metrics: Option<EvalMetrics>,
}
