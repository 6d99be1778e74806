//! Backend commands queued from UI to backend worker.

use client_core::{DocumentRequest, SowListRequest};

pub enum BackendCommand {
    LoadCatalog,
    LoadSows(SowListRequest),
    GenerateDocument(DocumentRequest),
    CopyToClipboard { text: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCatalog => "load_catalog",
            Self::LoadSows(_) => "load_sows",
            Self::GenerateDocument(_) => "generate_document",
            Self::CopyToClipboard { .. } => "copy_to_clipboard",
        }
    }
}
