use qaqc_core::enums::EventType;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DoctypeCommands;
use crate::commands::shared::doctype::resolve_document_type;
use crate::commands::shared::parse::parse_labels;
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc doctype`.
pub async fn handle(
    action: &DoctypeCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DoctypeCommands::Create {
            name,
            properties,
            required_for,
        } => {
            let required_for = parse_labels::<EventType>(required_for, "event type")?;
            let doc_type = ctx
                .service
                .create_document_type(name, properties.clone(), required_for)
                .await?;
            output(&doc_type, flags.format)
        }
        DoctypeCommands::Get { id } => {
            let doc_type = resolve_document_type(ctx, id).await?;
            output(&doc_type, flags.format)
        }
        DoctypeCommands::List => {
            let catalog = ctx.service.list_document_types().await?;
            output(&catalog, flags.format)
        }
    }
}
