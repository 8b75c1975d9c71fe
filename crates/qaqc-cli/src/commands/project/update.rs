use qaqc_core::enums::ProjectStatus;
use qaqc_db::updates::project::ProjectUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::{parse_date, parse_label};
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub id: String,
    pub name: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub ongoing: bool,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;

    let mut builder = ProjectUpdateBuilder::new();
    if let Some(name) = params.name {
        builder = builder.name(name);
    }
    if let Some(client) = params.client {
        builder = builder.client(client);
    }
    if let Some(location) = params.location {
        builder = builder.location(location);
    }
    if let Some(status) = params.status.as_deref() {
        builder = builder.status(parse_label::<ProjectStatus>(status, "status")?);
    }
    if let Some(start_date) = params.start_date.as_deref() {
        builder = builder.start_date(parse_date(start_date, "start_date")?);
    }
    if let Some(end_date) = params.end_date.as_deref() {
        builder = builder.end_date(Some(parse_date(end_date, "end_date")?));
    }
    if params.ongoing {
        builder = builder.end_date(None);
    }

    let project = ctx
        .service
        .update_project(&params.id, builder.build())
        .await?;
    output(&project, flags.format)
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.name.is_none()
        && params.client.is_none()
        && params.location.is_none()
        && params.status.is_none()
        && params.start_date.is_none()
        && params.end_date.is_none()
        && !params.ongoing
    {
        anyhow::bail!(
            "At least one of --name, --client, --location, --status, --start-date, \
             --end-date, or --ongoing must be provided"
        );
    }
    Ok(())
}
