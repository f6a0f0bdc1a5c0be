use std::path::PathBuf;

/// Errors that can occur while building or slicing the synthetic dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error(
        "split sizes {training} + {validation} + {test} do not sum to {total} samples"
    )]
    SplitMismatch {
        training: usize,
        validation: usize,
        test: usize,
        total: usize,
    },

    #[error("{0} slice is empty")]
    EmptySlice(&'static str),

    #[error("sample count {samples} does not match label count {labels}")]
    LengthMismatch { samples: usize, labels: usize },
}

/// Errors that can occur while saving or loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("destination directory not found: {0}")]
    DirNotFound(PathBuf),

    #[error("failed to save model weights: {0}")]
    ModelSave(String),

    #[error("failed to load model weights: {0}")]
    ModelLoad(String),

    #[error("failed to read metadata from {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse metadata from {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during a training run.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("persist error: {0}")]
    Persist(#[from] PersistError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while classifying a field snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("field length and/or width is not initialized for match {0}")]
    MissingFieldDimensions(String),

    #[error("snapshot encodes {actual} features but the model expects {expected}")]
    InputSize { expected: usize, actual: usize },

    #[error("field {dimension} for match {match_id} must be positive, got {value}")]
    InvalidFieldDimension {
        match_id: String,
        dimension: &'static str,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mismatch_display() {
        let err = DatasetError::SplitMismatch {
            training: 10,
            validation: 2,
            test: 2,
            total: 15,
        };
        assert_eq!(
            err.to_string(),
            "split sizes 10 + 2 + 2 do not sum to 15 samples"
        );
    }

    #[test]
    fn test_persist_error_display() {
        let err = PersistError::DirNotFound(PathBuf::from("models"));
        assert_eq!(err.to_string(), "destination directory not found: models");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("training.epochs must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: training.epochs must be > 0"
        );
    }

    #[test]
    fn test_detect_error_display() {
        let err = DetectError::MissingFieldDimensions("match-7".to_string());
        assert_eq!(
            err.to_string(),
            "field length and/or width is not initialized for match match-7"
        );

        let err = DetectError::InvalidFieldDimension {
            match_id: "match-7".to_string(),
            dimension: "width",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "field width for match match-7 must be positive, got 0"
        );
    }
}
