use anyhow::Result;

use wayside_analysis::{filter_by_needs, SavedReport};

use super::{print_route_info, run_analysis, CommandContext};
use crate::cli::NeedsArgs;
use crate::output_types::AmenityRow;

pub async fn execute(args: NeedsArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(args.analysis.overrides())?;
    let report = run_analysis(ctx, &args.analysis, &config).await?;

    let saved = SavedReport::from_analysis(&report);
    let summary = filter_by_needs(&saved, &args.needs);

    print_route_info(&ctx.output, &summary.route_info);

    ctx.output.section("Matching amenities");
    ctx.output.kv("Looking for", summary.target_categories.join(", "));
    ctx.output.table(AmenityRow::from_locations(&summary.key_amenity_locations));
    ctx.output.info(&summary.summary);

    ctx.output.result(summary)
}
