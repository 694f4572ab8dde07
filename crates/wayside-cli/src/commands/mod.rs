//! Command implementations

mod amenities;
mod analyze;
mod config;
mod detour;
mod filter;
mod find;
mod needs;
mod route;

use anyhow::{Context, Result};
use std::path::PathBuf;

use wayside_analysis::{AnalysisOptions, AnalysisReport, RouteAnalyzer};
use wayside_core::config::{CliConfigOverrides, LayeredConfig};
use wayside_osm::OverpassClient;
use wayside_routing::{OsrmClient, RoutePlanner};

use crate::cli::{AnalysisArgs, Cli, Commands, ServiceArgs};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::progress::with_spinner;

/// Shared state handed to every command
pub struct CommandContext {
    pub output: OutputWriter,
    config_file: Option<PathBuf>,
    services: ServiceArgs,
}

impl CommandContext {
    /// Resolve configuration with the global and command-specific overrides
    pub fn config(&self, mut overrides: CliConfigOverrides) -> Result<LayeredConfig> {
        self.services.apply(&mut overrides);
        load_config(self.config_file.as_deref(), overrides)
    }

    pub fn quiet(&self) -> bool {
        self.output.is_json()
    }
}

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let ctx = CommandContext {
        output: OutputWriter::new(cli.json),
        config_file: cli.config,
        services: cli.services,
    };

    match cli.command {
        Commands::Route(args) => route::execute(args, &ctx).await,
        Commands::Analyze(args) => analyze::execute(args, &ctx).await,
        Commands::Needs(args) => needs::execute(args, &ctx).await,
        Commands::Amenities(args) => amenities::execute(args, &ctx).await,
        Commands::Find(args) => find::execute(args, &ctx).await,
        Commands::Detour(args) => detour::execute(args, &ctx).await,
        Commands::Filter(args) => filter::execute(args, &ctx),
        Commands::Config => config::execute(&ctx),
    }
}

fn planner(config: &LayeredConfig) -> Result<RoutePlanner<OsrmClient, OverpassClient>> {
    let router = OsrmClient::from_config(config).context("Failed to create routing client")?;
    let geo = OverpassClient::from_config(config).context("Failed to create Overpass client")?;
    Ok(RoutePlanner::new(router, geo))
}

/// Load and analyze the route file named in the arguments
async fn run_analysis(
    ctx: &CommandContext,
    args: &AnalysisArgs,
    config: &LayeredConfig,
) -> Result<AnalysisReport> {
    let geo = OverpassClient::from_config(config).context("Failed to create Overpass client")?;
    let analyzer = RouteAnalyzer::new(geo);
    let options = AnalysisOptions::from_config(config);

    let report = with_spinner(
        "Searching for detours along the route...",
        ctx.quiet(),
        "Route analyzed",
        analyzer.analyze(&args.route, &options),
    )
    .await
    .with_context(|| format!("Failed to analyze {}", args.route.display()))?;

    if report.diagnostics.failed_points > 0 {
        ctx.output.warning(format!(
            "{} of {} sample points could not be searched",
            report.diagnostics.failed_points, report.route_info.sampled_points
        ));
    }

    Ok(report)
}

fn print_route_info(output: &OutputWriter, info: &wayside_analysis::RouteInfo) {
    output.section("Route");
    output.kv("Distance", format!("{:.2} km", info.route_distance_km));
    output.kv("Coordinates", info.total_coordinates);
    output.kv("Sample points", info.sampled_points);
}
