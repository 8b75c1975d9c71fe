//! Required-document checklist for an event.
//!
//! Each document type lists the event types it is required for. An event's
//! checklist is every type required by any of its event types, paired with
//! the document that fulfils it (if one was uploaded).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Document, DocumentType, Event};
use crate::enums::{DocumentStatus, EventType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistEntry {
    pub document_type_id: String,
    pub document_type_name: String,
    /// Which of the event's types require this document.
    pub required_by: Vec<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
}

impl ChecklistEntry {
    /// Uploaded and parsed.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.status == Some(DocumentStatus::Parsed)
    }
}

/// Document types required by any of `event_types`, in catalog order.
#[must_use]
pub fn required_document_types<'a>(
    event_types: &[EventType],
    catalog: &'a [DocumentType],
) -> Vec<&'a DocumentType> {
    catalog
        .iter()
        .filter(|t| event_types.iter().any(|e| t.is_required_for(*e)))
        .collect()
}

/// Build the checklist for `event` from the catalog and its documents.
///
/// When several documents share a type, a parsed one is reported first.
#[must_use]
pub fn document_checklist(
    event: &Event,
    catalog: &[DocumentType],
    documents: &[Document],
) -> Vec<ChecklistEntry> {
    required_document_types(&event.event_types, catalog)
        .into_iter()
        .map(|doc_type| {
            let mut matching = documents
                .iter()
                .filter(|d| d.event_id == event.id && d.document_type_id == doc_type.id)
                .collect::<Vec<_>>();
            matching.sort_by_key(|d| (!d.is_parsed(), d.created_at));
            let found = matching.first();

            ChecklistEntry {
                document_type_id: doc_type.id.clone(),
                document_type_name: doc_type.name.clone(),
                required_by: event
                    .event_types
                    .iter()
                    .copied()
                    .filter(|e| doc_type.is_required_for(*e))
                    .collect(),
                document_id: found.map(|d| d.id.clone()),
                status: found.map(|d| d.status),
            }
        })
        .collect()
}
