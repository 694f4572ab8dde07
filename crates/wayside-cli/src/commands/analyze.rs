use anyhow::{Context, Result};

use wayside_analysis::{summarize_general, SavedReport};

use super::{print_route_info, run_analysis, CommandContext};
use crate::cli::AnalyzeArgs;
use crate::output_types::{display_path, AmenityRow, AnalyzeOutput};

pub async fn execute(args: AnalyzeArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(args.analysis.overrides())?;
    let report = run_analysis(ctx, &args.analysis, &config).await?;

    let saved = SavedReport::from_analysis(&report);
    let report_path = if args.no_save {
        None
    } else {
        saved
            .save(&args.output)
            .with_context(|| format!("Failed to write report to {}", args.output.display()))?;
        ctx.output.success(format!("Saved detour report to {}", args.output.display()));
        Some(display_path(&args.output))
    };

    let summary = summarize_general(&saved);

    print_route_info(&ctx.output, &report.route_info);

    ctx.output.section("Detours");
    ctx.output.kv("Amenities", report.detour_summary.amenity_detours);
    ctx.output.kv("Paths", report.detour_summary.way_detours);
    ctx.output.kv("Total", report.detour_summary.total_detours);

    ctx.output.section("Highlights");
    ctx.output.table(AmenityRow::from_locations(&summary.key_amenity_locations));
    ctx.output.info(&summary.summary);

    ctx.output.result(AnalyzeOutput {
        route_info: report.route_info.clone(),
        detour_summary: report.detour_summary,
        diagnostics: report.diagnostics,
        summary,
        report_path,
    })
}
