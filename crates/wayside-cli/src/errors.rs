use console::style;
use std::fmt;

use wayside_core::error::WaysideError;

/// Error message with suggestions for fixing it
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Build from a command failure, adding hints for known domain errors
    pub fn from_error(err: &anyhow::Error) -> Self {
        let root = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<WaysideError>());

        let mut cli_error = Self::new(err.to_string());
        if let Some(root) = root {
            if root.to_string() != err.to_string() {
                cli_error = cli_error.with_context(root.to_string());
            }
        }

        match root {
            Some(WaysideError::RouteLoad { .. }) | Some(WaysideError::InvalidRoute { .. }) => {
                cli_error
                    .with_suggestion("Check that the file is a GeoJSON Feature or FeatureCollection")
                    .with_suggestion("The geometry must be a LineString of [lon, lat] with at least 2 positions")
            }
            Some(WaysideError::Routing { .. }) | Some(WaysideError::NoRoute) => cli_error
                .with_suggestion("Make sure an OSRM server is reachable at the configured URL")
                .with_suggestion("Set it with --osrm-url or WAYSIDE_OSRM_URL"),
            Some(WaysideError::GeoQuery { .. }) => cli_error
                .with_suggestion("The Overpass API may be busy; try again shortly")
                .with_suggestion("Set another endpoint with --overpass-url or WAYSIDE_OVERPASS_URL"),
            Some(WaysideError::NoMatchingAmenity { .. }) => cli_error
                .with_suggestion("Increase the search distance with --max-detour")
                .with_suggestion("Use a broader type, e.g. 'cafe' instead of a brand name"),
            Some(WaysideError::ConfigInvalid { .. }) | Some(WaysideError::ConfigMissing { .. }) => {
                cli_error.with_suggestion("Run 'wayside config' to see the resolved values")
            }
            _ => cli_error,
        }
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
        }
    }

    /// Single-line JSON form for `--json` mode
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": "error",
            "message": self.message,
            "details": self.context,
            "suggestions": self.suggestions,
        })
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref context) = self.context {
            write!(f, "\n{}", context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_routing_hints() {
        let err: anyhow::Result<()> = Err(WaysideError::NoRoute).context("Failed to create route");
        let cli_error = CliError::from_error(&err.unwrap_err());

        assert_eq!(cli_error.message, "Failed to create route");
        assert_eq!(
            cli_error.context.as_deref(),
            Some("No route found between the requested points")
        );
        assert_eq!(cli_error.suggestions.len(), 2);
    }

    #[test]
    fn test_unknown_errors_have_no_hints() {
        let cli_error = CliError::from_error(&anyhow::anyhow!("something else"));
        assert!(cli_error.suggestions.is_empty());
        assert!(cli_error.context.is_none());
        assert_eq!(cli_error.to_json()["status"], "error");
    }
}
