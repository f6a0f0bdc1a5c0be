use std::path::Path;

use tracing::warn;

use crate::data::DataConfig;
use crate::error::ConfigError;
use crate::model::NetworkSettings;
use crate::persist::OutputConfig;
use crate::training::trainer::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub network: NetworkSettings,
    pub training: TrainerConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let data = &self.data;
        if data.num_training_samples == 0 {
            return Err(ConfigError::Validation(
                "data.num_training_samples must be > 0".into(),
            ));
        }
        if data.num_validation_samples == 0 {
            return Err(ConfigError::Validation(
                "data.num_validation_samples must be > 0".into(),
            ));
        }
        if data.num_test_samples == 0 {
            return Err(ConfigError::Validation(
                "data.num_test_samples must be > 0".into(),
            ));
        }
        let split_total = data.split_sizes().total();
        if split_total != data.num_samples {
            return Err(ConfigError::Validation(format!(
                "data split sizes sum to {} but data.num_samples is {}",
                split_total, data.num_samples
            )));
        }

        if self.network.hidden_size == 0 {
            return Err(ConfigError::Validation(
                "network.hidden_size must be > 0".into(),
            ));
        }

        let training = &self.training;
        if training.epochs == 0 {
            return Err(ConfigError::Validation(
                "training.epochs must be > 0".into(),
            ));
        }
        if training.batch_size == 0 {
            return Err(ConfigError::Validation(
                "training.batch_size must be > 0".into(),
            ));
        }
        if training.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "training.learning_rate must be > 0".into(),
            ));
        }
        if training.rho <= 0.0 || training.rho >= 1.0 {
            return Err(ConfigError::Validation(
                "training.rho must be in (0, 1)".into(),
            ));
        }
        if training.epsilon <= 0.0 {
            return Err(ConfigError::Validation(
                "training.epsilon must be > 0".into(),
            ));
        }

        if self.output.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output.save_path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let config = AppConfig::default();
        assert_eq!(config.data.num_samples, 102_400);
        assert_eq!(config.data.num_training_samples, 81_920);
        assert_eq!(config.data.num_validation_samples, 10_240);
        assert_eq!(config.data.num_test_samples, 10_240);
        assert_eq!(config.network.hidden_size, 64);
        assert_eq!(config.training.epochs, 20);
        assert_eq!(config.training.batch_size, 512);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[training]
learning_rate = 0.01
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.training.learning_rate - 0.01).abs() < 1e-9);
        // Other fields should be defaults
        assert!((config.training.rho - 0.9).abs() < 1e-6);
        assert_eq!(config.training.epochs, 20);
        assert_eq!(config.data.num_samples, 102_400);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert!((config.training.learning_rate - default.training.learning_rate).abs() < 1e-9);
        assert_eq!(config.training.batch_size, default.training.batch_size);
        assert_eq!(config.output.save_path, default.output.save_path);
        assert!(config.data.seed.is_none());
    }

    #[test]
    fn test_validation_rejects_split_mismatch() {
        let mut config = AppConfig::default();
        config.data.num_training_samples = 80_980;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("102400"), "got: {err}");
    }

    #[test]
    fn test_validation_rejects_empty_test_split() {
        let mut config = AppConfig::default();
        config.data.num_test_samples = 0;
        config.data.num_samples = 92_160;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_epochs() {
        let mut config = AppConfig::default();
        config.training.epochs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_batch_size() {
        let mut config = AppConfig::default();
        config.training.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_lr() {
        let mut config = AppConfig::default();
        config.training.learning_rate = -0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_rho() {
        let mut config = AppConfig::default();
        config.training.rho = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_epsilon() {
        let mut config = AppConfig::default();
        config.training.epsilon = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_hidden_size() {
        let mut config = AppConfig::default();
        config.network.hidden_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_save_path() {
        let mut config = AppConfig::default();
        config.output.save_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.epochs, 20);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[data]
seed = 42

[training]
epochs = 5
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.epochs, 5);
        assert_eq!(config.data.seed, Some(42));
        // Others are defaults
        assert_eq!(config.training.batch_size, 512);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[training]\nbatch_size = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[training\nepochs = ").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
