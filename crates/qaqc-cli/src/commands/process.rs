mod list;

use qaqc_db::repos::process::NewProcess;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProcessCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc process`.
pub async fn handle(
    action: &ProcessCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProcessCommands::Create {
            name,
            description,
            event,
            questionnaire,
        } => {
            let process = ctx
                .service
                .create_process(NewProcess {
                    name: name.clone(),
                    description: description.clone().unwrap_or_default(),
                    event_id: event.clone(),
                    questionnaire_id: questionnaire.clone(),
                })
                .await?;
            output(&process, flags.format)
        }
        ProcessCommands::Rerun { id } => {
            let process = ctx.service.rerun_process(id).await?;
            output(&process, flags.format)
        }
        ProcessCommands::Get { id } => {
            let process = ctx.service.get_process(id).await?;
            output(&process, flags.format)
        }
        ProcessCommands::Failures { id } => {
            let process = ctx.service.get_process(id).await?;
            let failures = process.failures().collect::<Vec<_>>();
            output(&failures, flags.format)
        }
        ProcessCommands::List {
            event,
            questionnaire,
            result,
            limit,
        } => {
            list::run(
                list::Params {
                    event: event.as_deref(),
                    questionnaire: questionnaire.as_deref(),
                    result: result.as_deref(),
                    limit: *limit,
                },
                ctx,
                flags,
            )
            .await
        }
    }
}
