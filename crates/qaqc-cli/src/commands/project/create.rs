use qaqc_core::enums::ProjectStatus;
use qaqc_db::repos::project::NewProject;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_label};
use crate::context::AppContext;
use crate::output::output;

pub struct Params<'a> {
    pub name: &'a str,
    pub client: &'a str,
    pub location: &'a str,
    pub status: Option<&'a str>,
    pub start_date: &'a str,
    pub end_date: Option<&'a str>,
}

pub async fn run(params: Params<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = params
        .status
        .map(|raw| parse_label::<ProjectStatus>(raw, "status"))
        .transpose()?;
    let end_date = params
        .end_date
        .map(|raw| parse_date(raw, "end_date"))
        .transpose()?;

    let project = ctx
        .service
        .create_project(NewProject {
            name: params.name.to_string(),
            client: params.client.to_string(),
            location: params.location.to_string(),
            status,
            start_date: parse_date(params.start_date, "start_date")?,
            end_date,
        })
        .await?;
    output(&project, flags.format)
}
