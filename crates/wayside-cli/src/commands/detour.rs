use anyhow::{Context, Result};

use wayside_core::config::CliConfigOverrides;
use wayside_core::formats::{detour_route_feature, save_geojson};

use super::{planner, CommandContext};
use crate::cli::DetourArgs;
use crate::output_types::{display_path, DetourOutput};
use crate::progress::with_spinner;

pub async fn execute(args: DetourArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(CliConfigOverrides {
        profile: args.profile,
        ..CliConfigOverrides::default()
    })?;
    let profile = config.profile.value;
    let planner = planner(&config)?;

    let detour = with_spinner(
        "Routing through the detour point...",
        ctx.quiet(),
        "Detour route created",
        planner.create_detour_route(args.from, args.via, args.to, profile),
    )
    .await
    .context("Failed to create detour route")?;

    let feature = detour_route_feature(&detour)?;
    save_geojson(&feature, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    ctx.output.success(format!("Saved detour route to {}", args.output.display()));
    ctx.output.section("Detour route");
    ctx.output.kv("Profile", profile);
    ctx.output.kv("Distance", format!("{:.2} km", detour.distance_km()));
    ctx.output.kv("Duration", format!("{:.1} min", detour.duration_minutes()));
    ctx.output.kv(
        "Legs",
        format!("{:.2} km + {:.2} km", detour.first_leg_km, detour.second_leg_km),
    );

    ctx.output.result(DetourOutput {
        profile,
        distance_km: detour.distance_km(),
        duration_minutes: detour.duration_minutes(),
        first_leg_km: detour.first_leg_km,
        second_leg_km: detour.second_leg_km,
        coordinates: detour.route.len(),
        output_path: display_path(&args.output),
    })
}
