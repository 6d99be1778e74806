use serde::{Deserialize, Serialize};

use crate::domain::{ChargerTypeId, CustomerId, SowId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargerTypeSummary {
    pub id: ChargerTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Item of `GET /api/sows?charger_type_id=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SowSummary {
    pub id: SowId,
    #[serde(default)]
    pub title: Option<String>,
}

impl SowSummary {
    /// Dropdown label, falling back to `(untitled {id})` for blank titles.
    pub fn label(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("(untitled {})", self.id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SowDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_instructions: Option<String>,
}
