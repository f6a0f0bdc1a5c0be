//! Model artifact persistence: burn weight records plus a JSON file holding
//! the architecture and run metadata.

mod artifact;
mod metadata;

pub use artifact::{load_metadata, load_model, metadata_path, save_model, weights_path};
pub use metadata::{ModelMetadata, NetworkArchitecture};

use std::path::PathBuf;

/// Where the trained model is written.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path without extension; `.mpk` and `.json` are appended.
    pub save_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            save_path: PathBuf::from("models/ball_field_side"),
        }
    }
}
