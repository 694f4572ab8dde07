use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use wayside_analysis::{filter_report_value, summarize_report_value, FilterOutcome, GeneralSummary};

use super::{print_route_info, CommandContext};
use crate::cli::FilterArgs;
use crate::output_types::AmenityRow;

pub fn execute(args: FilterArgs, ctx: &CommandContext) -> Result<()> {
    let content = fs::read_to_string(&args.report)
        .with_context(|| format!("Failed to read report {}", args.report.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", args.report.display()))?;

    if args.needs.is_empty() {
        return match summarize_report_value(value) {
            FilterOutcome::Filtered(summary) => general(summary, ctx),
            FilterOutcome::Unchanged(value) => unchanged(&args.report, value, ctx),
        };
    }

    match filter_report_value(value, &args.needs) {
        FilterOutcome::Filtered(summary) => {
            print_route_info(&ctx.output, &summary.route_info);
            ctx.output.section("Matching amenities");
            ctx.output.kv("Looking for", summary.target_categories.join(", "));
            ctx.output.table(AmenityRow::from_locations(&summary.key_amenity_locations));
            ctx.output.info(&summary.summary);
            ctx.output.result(summary)
        }
        FilterOutcome::Unchanged(value) => unchanged(&args.report, value, ctx),
    }
}

fn general(summary: GeneralSummary, ctx: &CommandContext) -> Result<()> {
    print_route_info(&ctx.output, &summary.route_info);
    ctx.output.section("Highlights");
    ctx.output.table(AmenityRow::from_locations(&summary.key_amenity_locations));
    ctx.output.info(&summary.summary);

    ctx.output.result(summary)
}

fn unchanged(path: &Path, value: serde_json::Value, ctx: &CommandContext) -> Result<()> {
    ctx.output.warning(format!(
        "{} has no sampling points; returning it unchanged",
        path.display()
    ));
    if !ctx.output.is_json() {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    ctx.output.result(value)
}
