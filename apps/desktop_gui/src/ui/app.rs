use std::time::Duration;

use client_core::{
    clipboard::download_pdf,
    state::SOW_PLACEHOLDER_LABEL,
    Alert, FormState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{ChargerTypeId, CustomerId, SowId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{apply_ui_event, clear_settled_generating_status, GENERATING_STATUS},
};

/// Stable egui id salts for the form widgets; each input and button is
/// addressed by the same id across frames and releases.
const CHARGER_TYPE_ID: &str = "charger_type";
const SOW_ID: &str = "sow";
const CUSTOMER_ID: &str = "customer";
const GENERATE_BTN_ID: &str = "generateBtn";
const PDF_BTN_ID: &str = "pdfBtn";
const SOW_CONTENT_ID: &str = "sowContent";

pub struct SowFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: FormState,
    server_url: String,
    status: String,
    alert: Option<Alert>,
}

impl SowFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        let mut state = FormState::new();
        state.reset_sow();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state,
            server_url,
            status: "Loading charger types...".to_string(),
            alert: None,
        };
        app.dispatch(BackendCommand::LoadCatalog);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(alert) = apply_ui_event(&mut self.state, event, &mut self.status) {
                self.alert = Some(alert);
            }
        }
    }

    fn on_charger_change(&mut self, charger: Option<ChargerTypeId>) {
        let request = self.state.select_charger(charger);
        clear_settled_generating_status(&self.state, &mut self.status);
        if let Some(request) = request {
            self.dispatch(BackendCommand::LoadSows(request));
        }
    }

    fn on_start_over(&mut self) {
        self.state.start_over();
        clear_settled_generating_status(&self.state, &mut self.status);
    }

    fn on_generate(&mut self) {
        if let Some(request) = self.state.begin_document() {
            self.status = GENERATING_STATUS.to_string();
            self.dispatch(BackendCommand::GenerateDocument(request));
        }
    }

    fn on_copy(&mut self) {
        let text = self.state.generated_text();
        if text.is_empty() {
            self.alert = Some(Alert::NothingToCopy);
            return;
        }
        let text = text.to_string();
        self.dispatch(BackendCommand::CopyToClipboard { text });
    }

    fn show_selectors(&mut self, ui: &mut egui::Ui) {
        let mut charger = self.state.charger().cloned();
        let charger_label = charger
            .as_ref()
            .and_then(|id| {
                self.state
                    .charger_types()
                    .iter()
                    .find(|summary| &summary.id == id)
            })
            .map_or(SOW_PLACEHOLDER_LABEL, |summary| summary.name.as_str())
            .to_string();

        ui.label("Charger type");
        egui::ComboBox::from_id_salt(CHARGER_TYPE_ID)
            .selected_text(charger_label)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut charger, None, SOW_PLACEHOLDER_LABEL);
                for summary in self.state.charger_types() {
                    ui.selectable_value(
                        &mut charger,
                        Some(summary.id.clone()),
                        summary.name.as_str(),
                    );
                }
            });
        if charger.as_ref() != self.state.charger() {
            self.on_charger_change(charger);
        }

        let mut sow: Option<SowId> = self.state.sow().cloned();
        let dropdown = self.state.sow_dropdown();
        let sow_label = sow
            .as_ref()
            .and_then(|id| dropdown.options().iter().find(|option| &option.value == id))
            .map_or(dropdown.placeholder_label(), |option| option.label.as_str())
            .to_string();

        ui.label("Scope of work");
        ui.add_enabled_ui(self.state.sow_dropdown_enabled(), |ui| {
            egui::ComboBox::from_id_salt(SOW_ID)
                .selected_text(sow_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut sow, None, dropdown.placeholder_label());
                    for option in dropdown.options() {
                        ui.selectable_value(
                            &mut sow,
                            Some(option.value.clone()),
                            option.label.as_str(),
                        );
                    }
                });
        });
        if sow.as_ref() != self.state.sow() {
            self.state.select_sow(sow);
            clear_settled_generating_status(&self.state, &mut self.status);
        }

        let mut customer: Option<CustomerId> = self.state.customer().cloned();
        let customer_label = customer
            .as_ref()
            .and_then(|id| self.state.customers().iter().find(|summary| &summary.id == id))
            .map(|summary| customer_name(summary.name.as_deref(), &summary.id))
            .unwrap_or_else(|| "(none)".to_string());

        ui.label("Customer");
        egui::ComboBox::from_id_salt(CUSTOMER_ID)
            .selected_text(customer_label)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut customer, None, "(none)");
                for summary in self.state.customers() {
                    ui.selectable_value(
                        &mut customer,
                        Some(summary.id.clone()),
                        customer_name(summary.name.as_deref(), &summary.id),
                    );
                }
            });
        if customer.as_ref() != self.state.customer() {
            self.state.select_customer(customer);
            clear_settled_generating_status(&self.state, &mut self.status);
        }
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        let actions_enabled = self.state.actions_enabled();
        ui.horizontal(|ui| {
            let generate = ui
                .push_id(GENERATE_BTN_ID, |ui| {
                    ui.add_enabled(actions_enabled, egui::Button::new("Generate SOW"))
                })
                .inner;
            if generate.clicked() {
                self.on_generate();
            }

            let pdf = ui
                .push_id(PDF_BTN_ID, |ui| {
                    ui.add_enabled(actions_enabled, egui::Button::new("Download PDF"))
                })
                .inner;
            if pdf.clicked() {
                self.alert = Some(download_pdf());
            }

            if ui.button("Copy to clipboard").clicked() {
                self.on_copy();
            }
            if ui.button("Start over").clicked() {
                self.on_start_over();
            }
        });
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Server: {}", self.server_url));
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(self.status.as_str());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.alert.is_none(), |ui| {
                ui.heading("SOW Builder");
                ui.add_space(8.0);
                self.show_selectors(ui);
                ui.add_space(8.0);
                self.show_actions(ui);
                ui.separator();

                let mut content: &str = self.state.generated_text();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut content)
                            .id_salt(SOW_CONTENT_ID)
                            .desired_rows(24)
                            .desired_width(f32::INFINITY)
                            .font(egui::TextStyle::Monospace),
                    );
                });
            });
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alert else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.message());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.alert = None;
        }
    }
}

fn customer_name(name: Option<&str>, id: &CustomerId) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Customer {id}"),
    }
}

impl eframe::App for SowFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);
        self.show_alert(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
