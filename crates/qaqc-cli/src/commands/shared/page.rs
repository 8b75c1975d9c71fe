use qaqc_core::pagination::Page;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Row cap for a list query: none when `--page` is set, since the page
/// envelope reports totals over the whole result.
#[must_use]
pub fn fetch_limit(local: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> Option<u32> {
    if flags.page.is_some() {
        None
    } else {
        Some(effective_limit(local, flags.limit, ctx.config.general.default_limit))
    }
}

/// Print `items` as a plain list, or as the `--page` slice sized by
/// `[general] page_size`.
pub fn output_list<T: Serialize>(
    items: Vec<T>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match flags.page {
        Some(page) => output(
            &Page::from_items(items, page, ctx.config.general.page_size),
            flags.format,
        ),
        None => output(&items, flags.format),
    }
}
