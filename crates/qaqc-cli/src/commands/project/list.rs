use qaqc_core::enums::ProjectStatus;
use qaqc_db::repos::project::ProjectFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::page::{fetch_limit, output_list};
use crate::commands::shared::parse::parse_label;
use crate::context::AppContext;

pub async fn run(
    search: Option<&str>,
    year: Option<i32>,
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_label::<ProjectStatus>(raw, "status"))
        .transpose()?;
    let filter = ProjectFilter {
        search: search.map(str::to_string),
        year,
        status,
        limit: fetch_limit(limit, ctx, flags),
    };

    let projects = ctx.service.list_projects(&filter).await?;
    output_list(projects, ctx, flags)
}
