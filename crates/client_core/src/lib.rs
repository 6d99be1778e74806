//! Client side of the SOW form: API access, form state, document assembly.

pub mod api;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod state;

pub use api::{HttpSowApi, SowApi};
pub use clipboard::{Alert, ClipboardSink, SystemClipboard};
pub use controller::{fetch_catalog, fetch_document, Catalog, FormController};
pub use document::DocumentTemplate;
pub use error::{ClipboardError, ConfigError, NetworkError};
pub use state::{
    DocumentRequest, FormPhase, FormState, FormView, Generation, SowDropdown, SowListRequest,
    SowOption,
};
