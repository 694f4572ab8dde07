use crate::error::{Result, WaysideError};
use crate::models::TransportProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_SAMPLE_SPACING_M: f64 = 300.0;
pub const DEFAULT_DETOUR_RADIUS_M: f64 = 200.0;
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_OSRM_URL: &str = "http://localhost:5000";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Wayside
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub sample_spacing_m: ConfigValue<f64>,
    pub detour_radius_m: ConfigValue<f64>,
    pub overpass_url: ConfigValue<String>,
    pub osrm_url: ConfigValue<String>,
    pub profile: ConfigValue<TransportProfile>,
    pub concurrency: ConfigValue<usize>,
    pub request_timeout_secs: ConfigValue<Option<u64>>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            sample_spacing_m: ConfigValue::new(DEFAULT_SAMPLE_SPACING_M, ConfigSource::Default),
            detour_radius_m: ConfigValue::new(DEFAULT_DETOUR_RADIUS_M, ConfigSource::Default),
            overpass_url: ConfigValue::new(DEFAULT_OVERPASS_URL.to_string(), ConfigSource::Default),
            osrm_url: ConfigValue::new(DEFAULT_OSRM_URL.to_string(), ConfigSource::Default),
            profile: ConfigValue::new(TransportProfile::Bicycle, ConfigSource::Default),
            concurrency: ConfigValue::new(1, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| WaysideError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| WaysideError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(spacing) = file_config.sample_spacing_m {
            self.sample_spacing_m.update(spacing, ConfigSource::File);
        }

        if let Some(radius) = file_config.detour_radius_m {
            self.detour_radius_m.update(radius, ConfigSource::File);
        }

        if let Some(url) = file_config.overpass_url {
            self.overpass_url.update(url, ConfigSource::File);
        }

        if let Some(url) = file_config.osrm_url {
            self.osrm_url.update(url, ConfigSource::File);
        }

        if let Some(profile) = file_config.profile {
            self.profile.update(profile, ConfigSource::File);
        }

        if let Some(concurrency) = file_config.concurrency {
            self.concurrency.update(concurrency, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(Some(timeout), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // WAYSIDE_SAMPLE_SPACING_M
        if let Ok(raw) = env::var("WAYSIDE_SAMPLE_SPACING_M") {
            match parse_positive_meters("sample_spacing_m", &raw) {
                Ok(spacing) => self.sample_spacing_m.update(spacing, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WAYSIDE_SAMPLE_SPACING_M value '{}': expected a positive number of meters",
                    raw
                ),
            }
        }

        // WAYSIDE_DETOUR_RADIUS_M
        if let Ok(raw) = env::var("WAYSIDE_DETOUR_RADIUS_M") {
            match parse_positive_meters("detour_radius_m", &raw) {
                Ok(radius) => self.detour_radius_m.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WAYSIDE_DETOUR_RADIUS_M value '{}': expected a positive number of meters",
                    raw
                ),
            }
        }

        if let Ok(url) = env::var("WAYSIDE_OVERPASS_URL") {
            self.overpass_url.update(url, ConfigSource::Environment);
        }

        if let Ok(url) = env::var("WAYSIDE_OSRM_URL") {
            self.osrm_url.update(url, ConfigSource::Environment);
        }

        // WAYSIDE_PROFILE
        if let Ok(raw) = env::var("WAYSIDE_PROFILE") {
            match parse_profile(&raw) {
                Ok(profile) => self.profile.update(profile, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WAYSIDE_PROFILE value '{}': expected bicycle or foot",
                    raw
                ),
            }
        }

        // WAYSIDE_CONCURRENCY
        if let Ok(raw) = env::var("WAYSIDE_CONCURRENCY") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => self.concurrency.update(n, ConfigSource::Environment),
                _ => tracing::warn!(
                    "Invalid WAYSIDE_CONCURRENCY value '{}': expected a positive integer",
                    raw
                ),
            }
        }

        // WAYSIDE_REQUEST_TIMEOUT_SECS
        if let Ok(raw) = env::var("WAYSIDE_REQUEST_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => self.request_timeout_secs.update(Some(secs), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WAYSIDE_REQUEST_TIMEOUT_SECS value '{}': expected whole seconds",
                    raw
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(spacing) = overrides.sample_spacing_m {
            self.sample_spacing_m.update(spacing, ConfigSource::Cli);
        }

        if let Some(radius) = overrides.detour_radius_m {
            self.detour_radius_m.update(radius, ConfigSource::Cli);
        }

        if let Some(url) = overrides.overpass_url {
            self.overpass_url.update(url, ConfigSource::Cli);
        }

        if let Some(url) = overrides.osrm_url {
            self.osrm_url.update(url, ConfigSource::Cli);
        }

        if let Some(profile) = overrides.profile {
            self.profile.update(profile, ConfigSource::Cli);
        }

        if let Some(concurrency) = overrides.concurrency {
            self.concurrency.update(concurrency, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs.update(Some(timeout), ConfigSource::Cli);
        }
    }

    /// Check that the resolved values are usable
    pub fn validate(&self) -> Result<()> {
        check_positive_meters("sample_spacing_m", self.sample_spacing_m.value)?;
        check_positive_meters("detour_radius_m", self.detour_radius_m.value)?;

        if self.concurrency.value == 0 {
            return Err(WaysideError::ConfigInvalid {
                key: "concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        for (key, url) in [("overpass_url", &self.overpass_url), ("osrm_url", &self.osrm_url)] {
            if url.value.trim().is_empty() {
                return Err(WaysideError::ConfigMissing { key: key.to_string() });
            }
        }

        Ok(())
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "sample_spacing_m".to_string(),
            (format!("{} m", self.sample_spacing_m.value), self.sample_spacing_m.source),
        );

        map.insert(
            "detour_radius_m".to_string(),
            (format!("{} m", self.detour_radius_m.value), self.detour_radius_m.source),
        );

        map.insert(
            "overpass_url".to_string(),
            (self.overpass_url.value.clone(), self.overpass_url.source),
        );

        map.insert("osrm_url".to_string(), (self.osrm_url.value.clone(), self.osrm_url.source));

        map.insert(
            "profile".to_string(),
            (self.profile.value.to_string(), self.profile.source),
        );

        map.insert(
            "concurrency".to_string(),
            (self.concurrency.value.to_string(), self.concurrency.source),
        );

        let timeout = match self.request_timeout_secs.value {
            Some(secs) => format!("{} s", secs),
            None => "client default".to_string(),
        };
        map.insert("request_timeout_secs".to_string(), (timeout, self.request_timeout_secs.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    sample_spacing_m: Option<f64>,
    detour_radius_m: Option<f64>,
    overpass_url: Option<String>,
    osrm_url: Option<String>,
    profile: Option<TransportProfile>,
    concurrency: Option<usize>,
    request_timeout_secs: Option<u64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub sample_spacing_m: Option<f64>,
    pub detour_radius_m: Option<f64>,
    pub overpass_url: Option<String>,
    pub osrm_url: Option<String>,
    pub profile: Option<TransportProfile>,
    pub concurrency: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

/// Parse transport profile from string
pub fn parse_profile(s: &str) -> Result<TransportProfile> {
    match s.to_lowercase().as_str() {
        "bicycle" | "bike" | "cycling" => Ok(TransportProfile::Bicycle),
        "foot" | "walking" | "walk" => Ok(TransportProfile::Foot),
        _ => Err(WaysideError::ConfigInvalid {
            key: "profile".to_string(),
            reason: format!("Invalid profile: {}. Use bicycle or foot", s),
        }),
    }
}

/// Parse a strictly positive, finite distance in meters
pub fn parse_positive_meters(key: &str, s: &str) -> Result<f64> {
    let value: f64 = s.trim().parse().map_err(|_| WaysideError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("'{}' is not a number", s),
    })?;

    check_positive_meters(key, value)
}

fn check_positive_meters(key: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WaysideError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("must be a positive distance in meters, got {}", value),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.sample_spacing_m.value, 300.0);
        assert_eq!(config.sample_spacing_m.source, ConfigSource::Default);
        assert_eq!(config.detour_radius_m.value, 200.0);
        assert_eq!(config.profile.value, TransportProfile::Bicycle);
        assert_eq!(config.concurrency.value, 1);
        assert!(config.request_timeout_secs.value.is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
sample_spacing_m = 250.0
detour_radius_m = 250.0
osrm_url = "http://osrm.internal:5000"
profile = "foot"
concurrency = 4
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.sample_spacing_m.value, 250.0);
        assert_eq!(config.sample_spacing_m.source, ConfigSource::File);
        assert_eq!(config.detour_radius_m.value, 250.0);
        assert_eq!(config.osrm_url.value, "http://osrm.internal:5000");
        assert_eq!(config.profile.value, TransportProfile::Foot);
        assert_eq!(config.concurrency.value, 4);
        assert_eq!(config.overpass_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sample_spacing_m = \"far\"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, WaysideError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            detour_radius_m: Some(300.0),
            profile: Some(TransportProfile::Foot),
            ..Default::default()
        });

        assert_eq!(config.detour_radius_m.value, 300.0);
        assert_eq!(config.detour_radius_m.source, ConfigSource::Cli);
        assert_eq!(config.profile.source, ConfigSource::Cli);
        assert_eq!(config.sample_spacing_m.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(parse_profile("bicycle").unwrap(), TransportProfile::Bicycle);
        assert_eq!(parse_profile("FOOT").unwrap(), TransportProfile::Foot);
        assert_eq!(parse_profile("walking").unwrap(), TransportProfile::Foot);
        assert!(parse_profile("car").is_err());
    }

    #[test]
    fn test_parse_positive_meters() {
        assert_eq!(parse_positive_meters("k", "150").unwrap(), 150.0);
        assert!(parse_positive_meters("k", "0").is_err());
        assert!(parse_positive_meters("k", "-5").is_err());
        assert!(parse_positive_meters("k", "NaN").is_err());
        assert!(parse_positive_meters("k", "abc").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = LayeredConfig::with_defaults();
        assert!(config.validate().is_ok());

        config.sample_spacing_m.update(0.0, ConfigSource::Cli);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inspection_map() {
        let map = LayeredConfig::with_defaults().to_inspection_map();

        assert_eq!(map.len(), 7);
        let (spacing, source) = &map["sample_spacing_m"];
        assert_eq!(spacing, "300 m");
        assert_eq!(*source, ConfigSource::Default);
        assert_eq!(map["request_timeout_secs"].0, "client default");
    }
}
