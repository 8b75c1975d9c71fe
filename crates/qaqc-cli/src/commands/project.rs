mod create;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            name,
            client,
            location,
            status,
            start_date,
            end_date,
        } => {
            create::run(
                create::Params {
                    name,
                    client,
                    location,
                    status: status.as_deref(),
                    start_date,
                    end_date: end_date.as_deref(),
                },
                ctx,
                flags,
            )
            .await
        }
        ProjectCommands::Update {
            id,
            name,
            client,
            location,
            status,
            start_date,
            end_date,
            ongoing,
        } => {
            update::run(
                update::Params {
                    id: id.clone(),
                    name: name.clone(),
                    client: client.clone(),
                    location: location.clone(),
                    status: status.clone(),
                    start_date: start_date.clone(),
                    end_date: end_date.clone(),
                    ongoing: *ongoing,
                },
                ctx,
                flags,
            )
            .await
        }
        ProjectCommands::List {
            search,
            year,
            status,
            limit,
        } => list::run(search.as_deref(), *year, status.as_deref(), *limit, ctx, flags).await,
        ProjectCommands::Get { id } => {
            let project = ctx.service.get_project(id).await?;
            output(&project, flags.format)
        }
        ProjectCommands::Years => {
            let years = ctx.service.available_years().await?;
            output(&years, flags.format)
        }
    }
}
