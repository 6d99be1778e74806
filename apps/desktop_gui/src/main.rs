use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, normalize_server_url},
    HttpSowApi, SowApi,
};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::ui::SowFormApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides `server_url` from sow_form.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = load_settings();
    let raw_url = args.server_url.as_deref().unwrap_or(&settings.server_url);
    let server_url = normalize_server_url(raw_url)?;
    let api: Arc<dyn SowApi> = Arc::new(
        HttpSowApi::with_timeout(&server_url, settings.request_timeout())
            .context("failed to build SOW api client")?,
    );

    let (cmd_tx, cmd_rx) = bounded(256);
    let (ui_tx, ui_rx) = bounded(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, api, settings.document_template())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SOW Builder")
            .with_inner_size([760.0, 720.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "SOW Builder",
        options,
        Box::new(move |_cc| Ok(Box::new(SowFormApp::new(cmd_tx, ui_rx, server_url)))),
    )
    .map_err(|err| anyhow!("sow form window failed: {err}"))
}
