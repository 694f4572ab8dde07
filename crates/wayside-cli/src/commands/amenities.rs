use anyhow::Result;

use wayside_analysis::extract_specific_amenities;

use super::{print_route_info, run_analysis, CommandContext};
use crate::cli::AmenitiesArgs;
use crate::output_types::AmenityRow;

pub async fn execute(args: AmenitiesArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(args.analysis.overrides())?;
    let report = run_analysis(ctx, &args.analysis, &config).await?;

    let found = extract_specific_amenities(&report, &args.types);

    print_route_info(&ctx.output, &found.route_info);
    ctx.output.section("Amenities");
    ctx.output.table(AmenityRow::from_matches(&found.matching_locations));
    ctx.output.info(&found.summary);

    ctx.output.result(found)
}
