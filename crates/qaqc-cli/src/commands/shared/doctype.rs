use anyhow::Context;
use qaqc_core::entities::DocumentType;
use qaqc_core::ids::{PREFIX_DOCUMENT_TYPE, has_prefix};

use crate::context::AppContext;

/// Look a document type up by ID, falling back to its unique name.
pub async fn resolve_document_type(ctx: &AppContext, key: &str) -> anyhow::Result<DocumentType> {
    if has_prefix(key, PREFIX_DOCUMENT_TYPE) {
        return Ok(ctx.service.get_document_type(key).await?);
    }
    ctx.service
        .find_document_type_by_name(key)
        .await?
        .with_context(|| format!("no document type with id or name '{key}'"))
}
