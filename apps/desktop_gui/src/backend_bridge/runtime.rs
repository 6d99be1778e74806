//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::{Context, Result};
use client_core::{
    clipboard::copy_text, fetch_catalog, fetch_document, DocumentTemplate, SowApi,
    SystemClipboard,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::{debug, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Each command runs as its own task, so a slow SOW
/// list can still be in flight when the next charger selection is queued; the
/// reducer discards whichever response is stale.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn SowApi>,
    template: DocumentTemplate,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;

    thread::Builder::new()
        .name("sow-backend".into())
        .spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let template = template.clone();
                let ui_tx = ui_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(cmd, api.as_ref(), &template).await;
                    deliver_ui_event(&ui_tx, event);
                });
            }
            debug!("ui command queue closed; backend worker exiting");
        })
        .context("backend worker startup failure")?;

    Ok(())
}

/// Never blocks a runtime worker on a backed-up UI queue.
fn deliver_ui_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            warn!(event = event.name(), "ui event queue full; dropping event");
        }
        Err(TrySendError::Disconnected(_)) => warn!("ui event receiver dropped"),
    }
}

async fn handle_command(
    cmd: BackendCommand,
    api: &dyn SowApi,
    template: &DocumentTemplate,
) -> UiEvent {
    match cmd {
        BackendCommand::LoadCatalog => UiEvent::CatalogLoaded(fetch_catalog(api).await),
        BackendCommand::LoadSows(request) => UiEvent::SowsLoaded {
            generation: request.generation,
            result: api.list_sows(&request.charger).await,
        },
        BackendCommand::GenerateDocument(request) => UiEvent::DocumentReady {
            generation: request.generation,
            result: fetch_document(api, template, &request).await,
        },
        BackendCommand::CopyToClipboard { text } => {
            UiEvent::Alert(copy_text(&SystemClipboard::default(), &text).await)
        }
    }
}
