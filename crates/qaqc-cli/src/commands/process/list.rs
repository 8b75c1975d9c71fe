use qaqc_core::enums::Verdict;
use qaqc_db::repos::process::ProcessFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::page::{fetch_limit, output_list};
use crate::commands::shared::parse::parse_label;
use crate::context::AppContext;

pub struct Params<'a> {
    pub event: Option<&'a str>,
    pub questionnaire: Option<&'a str>,
    pub result: Option<&'a str>,
    pub limit: Option<u32>,
}

/// List row: the process without its per-question results.
#[derive(Debug, Serialize)]
struct ProcessRow {
    id: String,
    name: String,
    event_id: String,
    questionnaire_id: String,
    result: Verdict,
    time: String,
    questions: usize,
    failed: usize,
}

pub async fn run(params: Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = ProcessFilter {
        event_id: params.event.map(str::to_string),
        questionnaire_id: params.questionnaire.map(str::to_string),
        result: params
            .result
            .map(|raw| parse_label::<Verdict>(raw, "result"))
            .transpose()?,
        limit: fetch_limit(params.limit, ctx, flags),
    };

    let rows = ctx
        .service
        .list_processes(&filter)
        .await?
        .into_iter()
        .map(|process| ProcessRow {
            questions: process.results.len(),
            failed: process.failures().count(),
            time: process.time.to_rfc3339(),
            id: process.id,
            name: process.name,
            event_id: process.event_id,
            questionnaire_id: process.questionnaire_id,
            result: process.result,
        })
        .collect::<Vec<_>>();
    output_list(rows, ctx, flags)
}
