//! Form state reducer: selections, SOW dropdown model and generated text.
//!
//! Every outbound request is stamped with a [`Generation`]. Responses carrying
//! an older generation are dropped, so a slow reply for a superseded charger
//! selection can never overwrite the current dropdown.

use shared::{
    domain::{ChargerTypeId, CustomerId, SowId},
    protocol::{ChargerTypeSummary, CustomerSummary, SowSummary},
};
use tracing::{debug, error, warn};

use crate::{document::GENERATION_FAILED_TEXT, error::NetworkError};

pub const SOW_PLACEHOLDER_LABEL: &str = "Select...";
pub const NO_SOWS_LABEL: &str = "No SOWs available";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SowOption {
    pub value: SowId,
    pub label: String,
}

impl From<&SowSummary> for SowOption {
    fn from(summary: &SowSummary) -> Self {
        Self {
            value: summary.id.clone(),
            label: summary.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SowDropdown {
    /// Single "Select..." option, disabled.
    #[default]
    Placeholder,
    /// The list fetch succeeded but returned nothing, disabled.
    NoneAvailable,
    Loaded(Vec<SowOption>),
}

impl SowDropdown {
    pub fn enabled(&self) -> bool {
        matches!(self, Self::Loaded(options) if !options.is_empty())
    }

    pub fn placeholder_label(&self) -> &'static str {
        match self {
            Self::NoneAvailable => NO_SOWS_LABEL,
            Self::Placeholder | Self::Loaded(_) => SOW_PLACEHOLDER_LABEL,
        }
    }

    pub fn options(&self) -> &[SowOption] {
        match self {
            Self::Loaded(options) => options,
            Self::Placeholder | Self::NoneAvailable => &[],
        }
    }

    pub fn contains(&self, sow: &SowId) -> bool {
        self.options().iter().any(|option| &option.value == sow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    ChargerSelected,
    SowsLoaded,
    SowSelected,
    DocumentGenerated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SowListRequest {
    pub generation: Generation,
    pub charger: ChargerTypeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub generation: Generation,
    pub sow: SowId,
    pub customer: Option<CustomerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    charger: Option<ChargerTypeId>,
    customer: Option<CustomerId>,
    sow: Option<SowId>,
    sow_dropdown: SowDropdown,
    generated_text: String,
    list_generation: Generation,
    document_generation: Generation,
    document_pending: bool,
    charger_types: Vec<ChargerTypeSummary>,
    customers: Vec<CustomerSummary>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charger(&self) -> Option<&ChargerTypeId> {
        self.charger.as_ref()
    }

    pub fn customer(&self) -> Option<&CustomerId> {
        self.customer.as_ref()
    }

    pub fn sow(&self) -> Option<&SowId> {
        self.sow.as_ref()
    }

    pub fn sow_dropdown(&self) -> &SowDropdown {
        &self.sow_dropdown
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    pub fn charger_types(&self) -> &[ChargerTypeSummary] {
        &self.charger_types
    }

    pub fn customers(&self) -> &[CustomerSummary] {
        &self.customers
    }

    pub fn sow_dropdown_enabled(&self) -> bool {
        self.charger.is_some() && self.sow_dropdown.enabled()
    }

    /// Generate and export are enabled together.
    pub fn actions_enabled(&self) -> bool {
        self.sow.is_some()
    }

    /// A document request was issued and its reply is still the current one.
    pub fn document_pending(&self) -> bool {
        self.document_pending
    }

    pub fn phase(&self) -> FormPhase {
        if self.charger.is_none() {
            FormPhase::Empty
        } else if !self.generated_text.is_empty() {
            FormPhase::DocumentGenerated
        } else if self.sow.is_some() {
            FormPhase::SowSelected
        } else if self.sow_dropdown.enabled() {
            FormPhase::SowsLoaded
        } else {
            FormPhase::ChargerSelected
        }
    }

    pub fn set_catalog(
        &mut self,
        charger_types: Vec<ChargerTypeSummary>,
        customers: Vec<CustomerSummary>,
    ) {
        self.charger_types = charger_types;
        self.customers = customers;
    }

    pub fn reset_sow(&mut self) {
        self.sow_dropdown = SowDropdown::Placeholder;
        self.sow = None;
        self.generated_text.clear();
        self.list_generation = self.list_generation.next();
        self.document_generation = self.document_generation.next();
        self.document_pending = false;
    }

    /// Resets the SOW dropdown and, for a non-empty selection, returns the list
    /// request the caller must issue.
    pub fn select_charger(&mut self, charger: Option<ChargerTypeId>) -> Option<SowListRequest> {
        self.charger = charger;
        self.reset_sow();
        self.charger.clone().map(|charger| SowListRequest {
            generation: self.list_generation,
            charger,
        })
    }

    /// Returns `false` when the response belongs to a superseded request.
    pub fn apply_sow_list(
        &mut self,
        generation: Generation,
        result: Result<Vec<SowSummary>, NetworkError>,
    ) -> bool {
        if generation != self.list_generation {
            debug!(
                generation = generation.value(),
                current = self.list_generation.value(),
                "dropping stale sow list response"
            );
            return false;
        }

        match result {
            Ok(list) if list.is_empty() => {
                self.sow_dropdown = SowDropdown::NoneAvailable;
            }
            Ok(list) => {
                self.sow_dropdown = SowDropdown::Loaded(list.iter().map(SowOption::from).collect());
            }
            Err(err) => {
                warn!(
                    charger_type_id = self.charger.as_ref().map(ChargerTypeId::as_str),
                    error = %err,
                    "failed to load sows"
                );
            }
        }
        true
    }

    /// Ids that are not in the loaded list count as no selection.
    pub fn select_sow(&mut self, sow: Option<SowId>) {
        let sow = sow.filter(|id| self.sow_dropdown.contains(id));
        if sow != self.sow {
            self.document_generation = self.document_generation.next();
            self.document_pending = false;
        }
        self.sow = sow;
    }

    pub fn select_customer(&mut self, customer: Option<CustomerId>) {
        if customer != self.customer {
            self.document_generation = self.document_generation.next();
            self.document_pending = false;
        }
        self.customer = customer;
    }

    /// `None` when no SOW is selected.
    pub fn begin_document(&mut self) -> Option<DocumentRequest> {
        let sow = self.sow.clone()?;
        self.document_pending = true;
        Some(DocumentRequest {
            generation: self.document_generation,
            sow,
            customer: self.customer.clone(),
        })
    }

    pub fn apply_document(
        &mut self,
        generation: Generation,
        result: Result<String, NetworkError>,
    ) -> bool {
        if generation != self.document_generation {
            debug!(
                generation = generation.value(),
                current = self.document_generation.value(),
                "dropping stale document"
            );
            return false;
        }

        self.document_pending = false;
        match result {
            Ok(text) => self.generated_text = text,
            Err(err) => {
                error!(
                    sow_id = self.sow.as_ref().map(SowId::as_str),
                    error = %err,
                    "failed to generate sow"
                );
                self.generated_text = GENERATION_FAILED_TEXT.to_string();
            }
        }
        true
    }

    pub fn start_over(&mut self) {
        self.charger = None;
        self.customer = None;
        self.reset_sow();
    }

    /// Everything visible on the form, without the generation counters.
    pub fn view(&self) -> FormView<'_> {
        FormView {
            charger: self.charger.as_ref(),
            customer: self.customer.as_ref(),
            sow: self.sow.as_ref(),
            sow_dropdown: &self.sow_dropdown,
            sow_dropdown_enabled: self.sow_dropdown_enabled(),
            actions_enabled: self.actions_enabled(),
            generated_text: &self.generated_text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormView<'a> {
    pub charger: Option<&'a ChargerTypeId>,
    pub customer: Option<&'a CustomerId>,
    pub sow: Option<&'a SowId>,
    pub sow_dropdown: &'a SowDropdown,
    pub sow_dropdown_enabled: bool,
    pub actions_enabled: bool,
    pub generated_text: &'a str,
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
