//! LeanSheet - a simpler spreadsheet.
//!
//! Cells hold raw text. A cell's displayed value is computed from that text
//! on every read:
//!
//! - `A1 + 3`, `B2 / C2`, `2 ^ A4` - one binary operator between two
//!   references or numbers
//! - `sum= A1 B5`, `median= A1 A9`, `sqrt= C3`, ... - aggregates over the
//!   range spanned by the references
//! - anything else is shown as typed
//!
//! [`engine`] holds the evaluator; [`Document`] is a ready-made grid owner.

pub use leansheet_core::{Document, LeanSheetError, Result, SheetConfig, config, document};
pub use leansheet_engine::{engine, functions};
pub use leansheet_engine::engine::{CellRef, Value};
