//! Applies backend results to the form state.

use client_core::{Alert, FormState};
use tracing::warn;

use crate::controller::events::UiEvent;

pub const GENERATING_STATUS: &str = "Generating SOW...";

/// Drops the generating notice once no document reply is outstanding.
pub fn clear_settled_generating_status(state: &FormState, status: &mut String) {
    if !state.document_pending() && status.as_str() == GENERATING_STATUS {
        status.clear();
    }
}

/// Returns the alert the event asks the UI to show, if any.
pub fn apply_ui_event(
    state: &mut FormState,
    event: UiEvent,
    status: &mut String,
) -> Option<Alert> {
    match event {
        UiEvent::CatalogLoaded(Ok(catalog)) => {
            state.set_catalog(catalog.charger_types, catalog.customers);
            status.clear();
            None
        }
        UiEvent::CatalogLoaded(Err(err)) => {
            warn!(error = %err, "failed to load charger types");
            *status = format!("Could not load charger types: {err}");
            None
        }
        UiEvent::SowsLoaded { generation, result } => {
            state.apply_sow_list(generation, result);
            None
        }
        UiEvent::DocumentReady { generation, result } => {
            if state.apply_document(generation, result) {
                status.clear();
            } else {
                clear_settled_generating_status(state, status);
            }
            None
        }
        UiEvent::Alert(alert) => Some(alert),
    }
}
