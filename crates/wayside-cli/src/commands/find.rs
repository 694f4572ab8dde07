use anyhow::{Context, Result};

use wayside_analysis::{find_detour_point, AnalysisOptions, RouteAnalyzer};
use wayside_core::config::CliConfigOverrides;
use wayside_osm::OverpassClient;

use super::CommandContext;
use crate::cli::FindArgs;
use crate::output_types::{CandidateRow, FindOutput};
use crate::progress::with_spinner;

pub async fn execute(args: FindArgs, ctx: &CommandContext) -> Result<()> {
    // The search radius is the farthest acceptable detour
    let config = ctx.config(CliConfigOverrides {
        detour_radius_m: Some(args.max_detour),
        ..CliConfigOverrides::default()
    })?;

    let geo = OverpassClient::from_config(&config).context("Failed to create Overpass client")?;
    let analyzer = RouteAnalyzer::new(geo);
    let options = AnalysisOptions::from_config(&config);

    let report = with_spinner(
        &format!("Looking for {} along the route...", args.amenity_type),
        ctx.quiet(),
        "Route analyzed",
        analyzer.analyze(&args.route, &options),
    )
    .await
    .with_context(|| format!("Failed to analyze {}", args.route.display()))?;

    let found = find_detour_point(&report, &args.amenity_type, args.name.as_deref())?;
    let point = &found.detour_point;

    ctx.output.success(format!("Found {} ({})", point.name, point.amenity_type));
    ctx.output.kv("Location", format!("{:.6}, {:.6}", point.lat, point.lon));
    ctx.output.kv("Detour", format!("{:.1} m from route", point.detour_distance_m));

    if !found.alternatives.is_empty() {
        ctx.output.section("Alternatives");
        ctx.output.table(found.alternatives.iter().map(CandidateRow::from).collect());
    }

    ctx.output.result(FindOutput {
        detour_point: found.detour_point.clone(),
        alternatives: found.alternatives,
    })
}
