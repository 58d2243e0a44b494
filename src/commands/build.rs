use std::path::PathBuf;

use crate::{
    BuildArgs,
    build::{Builder, base_path_from_config},
    config::{ConfigError, QuireConfig},
};

pub fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let (config, config_path) = load_config(args)?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let builder = Builder::new(config, base_path);
    let result = builder.build()?;

    log::info!(
        "Built site to {} ({} page(s) written, {} skipped)",
        result.output_dir.display(),
        result.pages_written,
        result.skipped
    );

    Ok(())
}

/// Load the config and apply the `--mode` flag.
///
/// The flag wins over `QUIRE_MODE` and the file, which the loader already merged.
fn load_config(args: &BuildArgs) -> Result<(QuireConfig, PathBuf), ConfigError> {
    let (mut config, config_path) = QuireConfig::load_from_arg(args.config_file.as_deref())?;

    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    Ok((config, config_path))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::BuildMode;
    use crate::config::test_env::ScopedEnv;

    fn args(dir: &TempDir, mode: Option<BuildMode>) -> BuildArgs {
        let config_file = dir.path().join("quire.yaml");
        fs::write(&config_file, "mode: production\n").unwrap();
        BuildArgs {
            config_file: Some(config_file),
            mode,
        }
    }

    #[test]
    fn test_flag_overrides_env_and_file() {
        let _env = ScopedEnv::set("QUIRE_MODE", Some("production"));
        let dir = TempDir::new().unwrap();

        let (config, _) = load_config(&args(&dir, Some(BuildMode::Development))).unwrap();

        assert_eq!(config.mode, BuildMode::Development);
    }

    #[test]
    fn test_flag_overrides_development_env() {
        let _env = ScopedEnv::set("QUIRE_MODE", Some("development"));
        let dir = TempDir::new().unwrap();

        let (config, _) = load_config(&args(&dir, Some(BuildMode::Production))).unwrap();

        assert_eq!(config.mode, BuildMode::Production);
    }

    #[test]
    fn test_env_applies_without_flag() {
        let _env = ScopedEnv::set("QUIRE_MODE", Some("development"));
        let dir = TempDir::new().unwrap();

        let (config, path) = load_config(&args(&dir, None)).unwrap();

        assert_eq!(config.mode, BuildMode::Development);
        assert_eq!(path, dir.path().join("quire.yaml"));
    }

    #[test]
    fn test_file_applies_without_flag_or_env() {
        let _env = ScopedEnv::set("QUIRE_MODE", None);
        let dir = TempDir::new().unwrap();

        let (config, _) = load_config(&args(&dir, None)).unwrap();

        assert_eq!(config.mode, BuildMode::Production);
    }
}
