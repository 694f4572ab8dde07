use std::env;
use std::path::PathBuf;

use wayside_core::config::LayeredConfig;
use wayside_core::error::Result;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DATA_DIR: &str = "data";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,

    /// Directory that `route_file` request paths are resolved in
    pub data_dir: PathBuf,

    /// Service endpoints and analysis defaults
    pub services: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// `WAYSIDE_CONFIG` names an optional TOML file applied before the
    /// `WAYSIDE_*` service variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("WAYSIDE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origin =
            env::var("WAYSIDE_CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let data_dir = env::var_os("WAYSIDE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let mut services = LayeredConfig::with_defaults();
        if let Some(path) = env::var_os("WAYSIDE_CONFIG").map(PathBuf::from) {
            services = services.load_from_file(path)?;
        }
        let services = services.load_from_env();
        services.validate()?;

        Ok(Self {
            port,
            cors_origin,
            data_dir,
            services,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ApiConfig {
            port: 8080,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            services: LayeredConfig::with_defaults(),
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
