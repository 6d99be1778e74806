//! Backend results delivered to the UI thread.

use client_core::{Alert, Catalog, Generation, NetworkError};
use shared::protocol::SowSummary;

pub enum UiEvent {
    CatalogLoaded(Result<Catalog, NetworkError>),
    SowsLoaded {
        generation: Generation,
        result: Result<Vec<SowSummary>, NetworkError>,
    },
    DocumentReady {
        generation: Generation,
        result: Result<String, NetworkError>,
    },
    Alert(Alert),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogLoaded(_) => "catalog_loaded",
            Self::SowsLoaded { .. } => "sows_loaded",
            Self::DocumentReady { .. } => "document_ready",
            Self::Alert(_) => "alert",
        }
    }
}
