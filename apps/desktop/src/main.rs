use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, normalize_server_url},
    FormController, HttpSowApi, SystemClipboard,
};
use shared::domain::{ChargerTypeId, CustomerId, SowId};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sow-form", about = "Build SOW documents from the SOW service")]
struct Args {
    /// Overrides `server_url` from sow_form.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List charger types.
    ChargerTypes,
    /// List customers.
    Customers,
    /// List the SOWs available for a charger type.
    Sows {
        #[arg(long)]
        charger: String,
    },
    /// Generate the SOW document and print it.
    Generate {
        #[arg(long)]
        charger: String,
        #[arg(long)]
        sow: String,
        #[arg(long)]
        customer: Option<String>,
        /// Copy the generated text to the system clipboard.
        #[arg(long)]
        copy: bool,
        /// On Linux, keep serving the copied text for up to this many seconds
        /// unless another application takes over the clipboard first.
        #[arg(long, default_value_t = 30, requires = "copy")]
        copy_hold_secs: u64,
        #[arg(long)]
        pdf: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings();
    let raw_url = args.server_url.as_deref().unwrap_or(&settings.server_url);
    let server_url = normalize_server_url(raw_url)?;
    let api = HttpSowApi::with_timeout(&server_url, settings.request_timeout())
        .context("failed to build SOW api client")?;
    info!(%server_url, "using sow service");

    let mut controller = FormController::with_template(Arc::new(api), settings.document_template());

    match args.command {
        Command::ChargerTypes => {
            controller
                .load_catalog()
                .await
                .context("failed to load charger types")?;
            for charger in controller.state().charger_types() {
                println!("{}\t{}", charger.id, charger.name);
            }
        }
        Command::Customers => {
            controller
                .load_catalog()
                .await
                .context("failed to load catalog")?;
            for customer in controller.state().customers() {
                println!("{}\t{}", customer.id, customer.name.as_deref().unwrap_or(""));
            }
        }
        Command::Sows { charger } => {
            controller
                .on_charger_change(ChargerTypeId::from_selection(&charger))
                .await;
            let dropdown = controller.state().sow_dropdown();
            if !controller.state().sow_dropdown_enabled() {
                println!("{}", dropdown.placeholder_label());
            }
            for option in dropdown.options() {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Command::Generate {
            charger,
            sow,
            customer,
            copy,
            copy_hold_secs,
            pdf,
        } => {
            controller
                .on_charger_change(ChargerTypeId::from_selection(&charger))
                .await;
            controller.on_customer_change(customer.as_deref().and_then(CustomerId::from_selection));
            controller.on_sow_change(SowId::from_selection(&sow));
            if !controller.state().actions_enabled() {
                bail!("sow '{sow}' is not available for charger type '{charger}'");
            }

            controller.generate_document().await;
            println!("{}", controller.state().generated_text());

            if copy {
                let clipboard = SystemClipboard::holding(Duration::from_secs(copy_hold_secs));
                let alert = controller.copy_to_clipboard(&clipboard).await;
                eprintln!("{}", alert.message());
            }
            if pdf {
                eprintln!("{}", controller.download_pdf().message());
            }
        }
    }

    Ok(())
}
