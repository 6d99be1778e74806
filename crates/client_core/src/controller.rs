//! Async driver over [`FormState`]: issues the fetches each form event needs
//! and feeds the results back through the reducer.

use std::sync::Arc;

use shared::{
    domain::{ChargerTypeId, CustomerId, SowId},
    protocol::{ChargerTypeSummary, CustomerSummary},
};
use tracing::{info, warn};

use crate::{
    api::SowApi,
    clipboard::{copy_text, download_pdf, Alert, ClipboardSink},
    document::{local_timestamp, render_document, DocumentTemplate},
    error::NetworkError,
    state::{DocumentRequest, FormState},
};

/// Fetches the SOW detail, then the customer detail when one is selected, and
/// renders the document. The customer is fetched once and reused for both
/// check-in and check-out blocks.
pub async fn fetch_document<A: SowApi + ?Sized>(
    api: &A,
    template: &DocumentTemplate,
    request: &DocumentRequest,
) -> Result<String, NetworkError> {
    let sow = api.sow_detail(&request.sow).await?;
    let timestamp = local_timestamp();
    let customer = match &request.customer {
        Some(customer) => Some(api.customer_detail(customer).await?),
        None => None,
    };
    Ok(render_document(template, &timestamp, &sow, customer.as_ref()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub charger_types: Vec<ChargerTypeSummary>,
    pub customers: Vec<CustomerSummary>,
}

/// Charger types, then customers. A failed customer list leaves that list
/// empty instead of failing the catalog.
pub async fn fetch_catalog<A: SowApi + ?Sized>(api: &A) -> Result<Catalog, NetworkError> {
    let charger_types = api.list_charger_types().await?;
    let customers = match api.list_customers().await {
        Ok(customers) => customers,
        Err(err) => {
            warn!(error = %err, "failed to load customers");
            Vec::new()
        }
    };
    info!(
        charger_types = charger_types.len(),
        customers = customers.len(),
        "catalog loaded"
    );
    Ok(Catalog {
        charger_types,
        customers,
    })
}

pub struct FormController<A: SowApi + ?Sized> {
    api: Arc<A>,
    template: DocumentTemplate,
    state: FormState,
}

impl<A: SowApi + ?Sized> FormController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_template(api, DocumentTemplate::default())
    }

    pub fn with_template(api: Arc<A>, template: DocumentTemplate) -> Self {
        let mut state = FormState::new();
        state.reset_sow();
        Self {
            api,
            template,
            state,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Fills the charger type and customer dropdowns.
    pub async fn load_catalog(&mut self) -> Result<(), NetworkError> {
        let catalog = fetch_catalog(self.api.as_ref()).await?;
        self.state.set_catalog(catalog.charger_types, catalog.customers);
        Ok(())
    }

    pub fn reset_sow(&mut self) {
        self.state.reset_sow();
    }

    pub async fn on_charger_change(&mut self, charger: Option<ChargerTypeId>) {
        let Some(request) = self.state.select_charger(charger) else {
            return;
        };
        let result = self.api.list_sows(&request.charger).await;
        self.state.apply_sow_list(request.generation, result);
    }

    pub fn on_sow_change(&mut self, sow: Option<SowId>) {
        self.state.select_sow(sow);
    }

    pub fn on_customer_change(&mut self, customer: Option<CustomerId>) {
        self.state.select_customer(customer);
    }

    /// No-op without a selected SOW.
    pub async fn generate_document(&mut self) {
        let Some(request) = self.state.begin_document() else {
            return;
        };
        let result = fetch_document(self.api.as_ref(), &self.template, &request).await;
        self.state.apply_document(request.generation, result);
    }

    pub fn start_over(&mut self) {
        self.state.start_over();
    }

    pub async fn copy_to_clipboard(&self, clipboard: &dyn ClipboardSink) -> Alert {
        copy_text(clipboard, self.state.generated_text()).await
    }

    pub fn download_pdf(&self) -> Alert {
        download_pdf()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
