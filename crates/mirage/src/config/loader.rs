//! Configuration file loading for Mirage
//!
//! Handles loading and parsing configuration files using the config crate.

use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use crate::config::{Config, ConfigError, ENV_PREFIX, EXAMPLE_CONFIG};

type Builder = config::ConfigBuilder<DefaultState>;

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let builder = ConfigBuilder::builder().add_source(File::from_str(content, FileFormat::Toml));
        Self::finish(builder)
    }

    /// Load the given file (or the embedded example when `None`) and apply
    /// `MIRAGE_*` environment overrides on top
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let content = match path {
            Some(path) => read_file(path)?,
            None => EXAMPLE_CONFIG.to_owned(),
        };
        let builder = ConfigBuilder::builder()
            .add_source(File::from_str(&content, FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );
        Self::finish(builder)
    }

    fn finish(builder: Builder) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.completion.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "completion.base_url is empty".to_owned(),
            ));
        }
        if self.completion.model.trim().is_empty() {
            return Err(ConfigError::Invalid("completion.model is empty".to_owned()));
        }
        if self.completion.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "completion.timeout_secs must be positive".to_owned(),
            ));
        }

        for lang in self.languages.sorted() {
            let id = &lang.key;
            if lang.name.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{id}' has empty name"
                )));
            }
            if lang.extension.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{id}' has empty extension"
                )));
            }
            // Client-rendered code never reaches the detector
            if !lang.supports_simulated_execution() && !lang.input_patterns.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "language '{id}' is {} and cannot declare input patterns",
                    lang.kind
                )));
            }
        }

        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
