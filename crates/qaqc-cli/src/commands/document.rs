use qaqc_core::enums::{DocumentStatus, FileFormat};
use qaqc_db::repos::document::NewDocument;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocumentCommands;
use crate::commands::shared::doctype::resolve_document_type;
use crate::commands::shared::page::output_list;
use crate::commands::shared::parse::{parse_label, parse_values};
use crate::context::AppContext;
use crate::output::output;

/// Handle `qaqc document`.
pub async fn handle(
    action: &DocumentCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DocumentCommands::Create {
            event,
            doctype,
            file_name,
            file_format,
        } => {
            let doc_type = resolve_document_type(ctx, doctype).await?;
            let document = ctx
                .service
                .create_document(NewDocument {
                    event_id: event.clone(),
                    document_type_id: doc_type.id,
                    file_name: file_name.clone(),
                    file_format: parse_label::<FileFormat>(file_format, "file format")?,
                })
                .await?;
            output(&document, flags.format)
        }
        DocumentCommands::Get { id } => {
            let document = ctx.service.get_document(id).await?;
            output(&document, flags.format)
        }
        DocumentCommands::List { event } => {
            let documents = ctx.service.list_documents(event).await?;
            output_list(documents, ctx, flags)
        }
        DocumentCommands::SetValues { id, values } => {
            let document = ctx
                .service
                .set_document_values(id, parse_values(values)?)
                .await?;
            output(&document, flags.format)
        }
        DocumentCommands::SetStatus { id, status } => {
            let status = parse_label::<DocumentStatus>(status, "status")?;
            let document = ctx.service.set_document_status(id, status).await?;
            output(&document, flags.format)
        }
    }
}
