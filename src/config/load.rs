//! Configuration loading from files and the environment.

use std::path::{Path, PathBuf};

use super::{ConfigError, QuireConfig};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "quire.yaml";

/// Prefix of the environment variables that override config keys.
/// `QUIRE_MODE=development` switches the build mode; nested keys use `__`
/// (e.g. `QUIRE_SITE__NAME`).
pub const ENV_PREFIX: &str = "QUIRE";

impl QuireConfig {
    /// Load the config from the command line argument, defaulting to `quire.yaml`.
    ///
    /// Returns the config together with the absolute config path, whose parent
    /// directory is the base for relative paths.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let config = Self::load_from_file(&config_file)?;
        Ok((config, config_file))
    }

    /// Load the config from a file path, layering `QUIRE_*` environment
    /// variables on top. A missing file is not an error.
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
        }

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<QuireConfig>()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a config from a YAML string, without environment overrides.
    #[cfg(test)]
    pub(crate) fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()?
            .try_deserialize::<QuireConfig>()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.markdown.heading_level_start) {
            return Err(ConfigError::Validation(format!(
                "markdown.heading_level_start must be between 1 and 6, got {}",
                self.markdown.heading_level_start
            )));
        }
        Ok(())
    }

    /// The source directory, resolved against `base_path`.
    pub fn source_dir(&self, base_path: &Path) -> PathBuf {
        resolve_against(&self.site.source, base_path)
    }

    /// The output directory, resolved against `base_path`.
    /// Falls back to the source directory so pages land next to their sources.
    pub fn output_dir(&self, base_path: &Path) -> PathBuf {
        match &self.site.output {
            Some(output) => resolve_against(output, base_path),
            None => self.source_dir(base_path),
        }
    }
}

fn resolve_against(path: &Path, base_path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}
