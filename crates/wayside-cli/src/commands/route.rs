use anyhow::{Context, Result};

use wayside_core::config::CliConfigOverrides;
use wayside_core::formats::{extended_route_feature, route_collection, route_feature, save_geojson};
use wayside_core::models::PlannedRoute;
use wayside_core::units::round_to;

use super::{planner, CommandContext};
use crate::cli::RouteArgs;
use crate::output_types::{display_path, RouteOutput};
use crate::progress::with_spinner;

pub async fn execute(args: RouteArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(CliConfigOverrides {
        profile: args.profile,
        ..CliConfigOverrides::default()
    })?;
    let profile = config.profile.value;
    let planner = planner(&config)?;

    let planned = if !args.via.is_empty() {
        let mut waypoints = vec![args.from];
        waypoints.extend(args.via.iter().copied());
        waypoints.push(args.to);

        with_spinner(
            "Routing through waypoints...",
            ctx.quiet(),
            "Route created",
            planner.route_through(&waypoints, profile),
        )
        .await
    } else if args.avoid_highways {
        with_spinner(
            "Looking for a route away from major roads...",
            ctx.quiet(),
            "Route created",
            planner.smart_reroute(args.from, args.to, profile),
        )
        .await
    } else {
        with_spinner(
            "Creating route...",
            ctx.quiet(),
            "Route created",
            planner.create_route(args.from, args.to, profile),
        )
        .await
    }
    .context("Failed to create route")?;

    if args.compare {
        let direct = planner
            .create_route(args.from, args.to, profile)
            .await
            .context("Failed to create direct route")?;
        let names = vec!["Avoiding highways".to_string(), "Direct".to_string()];
        let collection = route_collection(&[planned.clone(), direct], &names);
        save_geojson(&collection, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    } else {
        save(&planned, args.extended, &args.output)?;
    }

    ctx.output.success(format!("Saved route to {}", args.output.display()));
    ctx.output.section("Route");
    ctx.output.kv("Profile", profile);
    ctx.output.kv("Distance", format!("{:.2} km", planned.distance_km()));
    ctx.output.kv("Duration", format!("{:.1} min", planned.duration_minutes()));
    ctx.output.kv("Coordinates", planned.route.len());

    ctx.output.result(RouteOutput {
        profile,
        distance_km: round_to(planned.distance_km(), 2),
        duration_minutes: round_to(planned.duration_minutes(), 1),
        coordinates: planned.route.len(),
        waypoints: planned.waypoints.clone(),
        output_path: display_path(&args.output),
    })
}

fn save(planned: &PlannedRoute, extended: bool, path: &std::path::Path) -> Result<()> {
    let feature = if extended {
        extended_route_feature(planned)?
    } else {
        route_feature(planned)?
    };
    save_geojson(&feature, path).with_context(|| format!("Failed to write {}", path.display()))
}
