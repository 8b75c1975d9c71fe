use qaqc_core::enums::EventType;
use qaqc_db::repos::event::NewEvent;
use qaqc_db::updates::event::EventUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EventCommands;
use crate::commands::shared::page::{fetch_limit, output_list};
use crate::commands::shared::parse::{parse_datetime, parse_labels};
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc event`.
pub async fn handle(
    action: &EventCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EventCommands::Create {
            project,
            name,
            start,
            end,
            types,
        } => {
            let event = ctx
                .service
                .create_event(NewEvent {
                    project_id: project.clone(),
                    name: name.clone(),
                    start_datetime: parse_datetime(start, "start")?,
                    end_datetime: parse_datetime(end, "end")?,
                    event_types: parse_labels::<EventType>(types, "event type")?,
                })
                .await?;
            output(&event, flags.format)
        }
        EventCommands::Update {
            id,
            name,
            start,
            end,
            types,
        } => {
            if name.is_none() && start.is_none() && end.is_none() && types.is_empty() {
                anyhow::bail!("At least one of --name, --start, --end, or --type must be provided");
            }

            let mut builder = EventUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.as_str());
            }
            if let Some(start) = start {
                builder = builder.start_datetime(parse_datetime(start, "start")?);
            }
            if let Some(end) = end {
                builder = builder.end_datetime(parse_datetime(end, "end")?);
            }
            if !types.is_empty() {
                builder = builder.event_types(parse_labels::<EventType>(types, "event type")?);
            }

            let event = ctx.service.update_event(id, builder.build()).await?;
            output(&event, flags.format)
        }
        EventCommands::List { project, limit } => {
            let limit = fetch_limit(*limit, ctx, flags).unwrap_or(u32::MAX);
            let events = ctx.service.list_events(project, limit).await?;
            output_list(events, ctx, flags)
        }
        EventCommands::Get { id } => {
            let event = ctx.service.get_event(id).await?;
            output(&event, flags.format)
        }
        EventCommands::Checklist { id } => {
            let checklist = ctx.service.document_checklist(id).await?;
            output(&checklist, flags.format)
        }
    }
}
