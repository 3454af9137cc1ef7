//! leansheet-core - UI-agnostic document model + configuration.

pub mod config;
pub mod document;
pub mod error;

pub use config::SheetConfig;
pub use document::Document;
pub use error::{LeanSheetError, Result};

pub use leansheet_engine::engine::{CellRef, Value};
