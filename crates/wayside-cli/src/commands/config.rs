use anyhow::Result;

use wayside_core::config::CliConfigOverrides;

use super::CommandContext;
use crate::output_types::ConfigRow;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = ctx.config(CliConfigOverrides::default())?;

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    ctx.output.section("Configuration");
    if ctx.output.is_json() {
        return ctx.output.result(rows);
    }
    ctx.output.table(rows);
    Ok(())
}
