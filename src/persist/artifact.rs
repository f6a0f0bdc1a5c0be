use std::fs;
use std::path::{Path, PathBuf};

use burn::prelude::*;
use burn::record::DefaultRecorder;
use tracing::info;

use crate::error::PersistError;
use crate::model::BallFieldSideNetwork;
use crate::persist::metadata::ModelMetadata;

/// Extension the default recorder gives the weight file.
pub const WEIGHTS_EXTENSION: &str = "mpk";
pub const METADATA_EXTENSION: &str = "json";

pub fn weights_path(stem: &Path) -> PathBuf {
    stem.with_extension(WEIGHTS_EXTENSION)
}

pub fn metadata_path(stem: &Path) -> PathBuf {
    stem.with_extension(METADATA_EXTENSION)
}

/// Save weights to `<stem>.mpk` and metadata to `<stem>.json`.
///
/// The destination directory must already exist.
pub fn save_model<B: Backend>(
    model: &BallFieldSideNetwork<B>,
    metadata: &ModelMetadata,
    stem: &Path,
) -> Result<PathBuf, PersistError> {
    if let Some(dir) = stem.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            return Err(PersistError::DirNotFound(dir.to_path_buf()));
        }
    }

    let recorder = DefaultRecorder::default();
    model
        .clone()
        .save_file(stem.to_path_buf(), &recorder)
        .map_err(|e| PersistError::ModelSave(e.to_string()))?;

    let meta_json = serde_json::to_string_pretty(metadata)?;
    fs::write(metadata_path(stem), meta_json)?;

    let path = weights_path(stem);
    info!(path = %path.display(), "model saved");
    Ok(path)
}

/// Read the metadata written by [`save_model`].
pub fn load_metadata(stem: &Path) -> Result<ModelMetadata, PersistError> {
    let meta_path = metadata_path(stem);
    let meta_json = fs::read_to_string(&meta_path).map_err(|e| PersistError::MetadataRead {
        path: meta_path.clone(),
        source: e,
    })?;
    serde_json::from_str(&meta_json).map_err(|e| PersistError::MetadataParse {
        path: meta_path,
        source: e,
    })
}

/// Rebuild the network from its stored architecture and load the weights.
pub fn load_model<B: Backend>(
    stem: &Path,
    device: &B::Device,
) -> Result<(BallFieldSideNetwork<B>, ModelMetadata), PersistError> {
    let metadata = load_metadata(stem)?;
    let config = metadata.architecture.to_config()?;

    let recorder = DefaultRecorder::default();
    let model = config
        .init::<B>(device)
        .load_file(stem.to_path_buf(), &recorder, device)
        .map_err(|e| PersistError::ModelLoad(e.to_string()))?;
    Ok((model, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FEATURE_DIM;
    use crate::model::{BallFieldSideNetworkConfig, InferBackend};
    use crate::persist::metadata::NetworkArchitecture;
    use crate::training::metrics::EvalMetrics;

    fn test_metadata(config: &BallFieldSideNetworkConfig) -> ModelMetadata {
        ModelMetadata {
            architecture: NetworkArchitecture::from_config(config),
            epochs: 20,
            batch_size: 512,
            learning_rate: 1e-3,
            seed: Some(9),
            timestamp: 1_700_000_000,
            test_metrics: Some(EvalMetrics {
                loss: 0.05,
                accuracy: 0.99,
                samples: 10_240,
            }),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("ball_field_side");
        let device = Default::default();
        let config = BallFieldSideNetworkConfig::new();
        let model = config.init::<InferBackend>(&device);

        let path = save_model(&model, &test_metadata(&config), &stem).unwrap();
        assert_eq!(path, dir.path().join("ball_field_side.mpk"));
        assert!(path.exists());
        assert!(dir.path().join("ball_field_side.json").exists());

        let (loaded, metadata) = load_model::<InferBackend>(&stem, &device).unwrap();
        assert_eq!(loaded.input_size(), FEATURE_DIM);
        assert_eq!(loaded.hidden_size(), 64);
        assert_eq!(loaded.num_params(), model.num_params());
        assert_eq!(metadata.architecture.hidden_activation, "relu");
        assert_eq!(metadata.architecture.output_activation, "sigmoid");
        assert_eq!(metadata.seed, Some(9));

        let mut probe = vec![0.0f32; FEATURE_DIM];
        probe[0] = 0.5;
        probe[1] = -0.25;
        assert_eq!(model.predict(&probe), loaded.predict(&probe));
    }

    #[test]
    fn test_non_default_width_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("narrow");
        let device = Default::default();
        let config = BallFieldSideNetworkConfig::new().with_hidden_size(8);
        let model = config.init::<InferBackend>(&device);

        save_model(&model, &test_metadata(&config), &stem).unwrap();
        let (loaded, _) = load_model::<InferBackend>(&stem, &device).unwrap();
        assert_eq!(loaded.hidden_size(), 8);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("does_not_exist").join("model");
        let device = Default::default();
        let config = BallFieldSideNetworkConfig::new();
        let model = config.init::<InferBackend>(&device);

        let err = save_model(&model, &test_metadata(&config), &stem).unwrap_err();
        assert!(
            matches!(err, PersistError::DirNotFound(_)),
            "expected DirNotFound, got: {err}"
        );
        assert!(!dir.path().join("does_not_exist").exists());
    }

    #[test]
    fn test_load_missing_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let device = Default::default();
        let err = load_model::<InferBackend>(&dir.path().join("missing"), &device).unwrap_err();
        assert!(matches!(err, PersistError::MetadataRead { .. }));
    }

    #[test]
    fn test_unsupported_activation_is_rejected() {
        let mut arch = NetworkArchitecture::from_config(&BallFieldSideNetworkConfig::new());
        arch.hidden_activation = "tanh".to_string();
        assert!(matches!(arch.to_config(), Err(PersistError::ModelLoad(_))));
    }

    #[test]
    fn test_metadata_without_optional_fields() {
        let json = r#"{
            "architecture": {
                "input_size": 69,
                "hidden_size": 64,
                "hidden_activation": "relu",
                "output_size": 1,
                "output_activation": "sigmoid"
            },
            "epochs": 20,
            "batch_size": 512,
            "learning_rate": 0.001,
            "timestamp": 1700000000
        }"#;
        let meta: ModelMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.seed.is_none());
        assert!(meta.test_metrics.is_none());
    }
}
