//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use wayside_core::config::{CliConfigOverrides, LayeredConfig};

/// Config file picked up from the working directory when `--config` is absent
pub const LOCAL_CONFIG_FILE: &str = "wayside.toml";

/// Load defaults, then the config file, then the environment, then CLI overrides
pub fn load_config(file: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = resolve_config_file(file) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// An explicit file must exist; the local default is optional
fn resolve_config_file(file: Option<&Path>) -> Option<PathBuf> {
    match file {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wayside_core::config::ConfigSource;

    #[test]
    fn test_file_then_cli() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wayside.toml");
        fs::write(&path, "sample_spacing_m = 500.0\ndetour_radius_m = 120.0\n").unwrap();

        let overrides = CliConfigOverrides {
            detour_radius_m: Some(80.0),
            ..CliConfigOverrides::default()
        };
        let config = load_config(Some(&path), overrides).unwrap();

        assert_eq!(config.sample_spacing_m.value, 500.0);
        assert_eq!(config.sample_spacing_m.source, ConfigSource::File);
        assert_eq!(config.detour_radius_m.value, 80.0);
        assert_eq!(config.detour_radius_m.source, ConfigSource::Cli);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path), CliConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let overrides = CliConfigOverrides {
            concurrency: Some(0),
            ..CliConfigOverrides::default()
        };
        assert!(load_config(None, overrides).is_err());
    }
}
