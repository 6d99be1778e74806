//! UI layer for desktop GUI: the SOW form window.

pub mod app;

pub use app::SowFormApp;
