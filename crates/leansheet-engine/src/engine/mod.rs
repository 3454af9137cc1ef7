//! Spreadsheet engine API.
//!
//! This module provides the formula evaluator for the spreadsheet:
//!
//! - [`Cell`], [`Grid`], [`GridView`] - Cell storage and the read access the evaluator needs
//! - [`CellRef`] - Cell label decoding and encoding (A1 notation ↔ row/col indices)
//! - [`evaluate`], [`evaluate_cell`], [`Evaluator`] - Formula evaluation
//! - [`Formula`] - Classification of raw cell text
//! - [`Range`] - Bounding range of aggregate operands
//! - [`CycleGuard`], [`detect_cycle`] - Circular reference handling
//! - [`extract_references`] - Cells a formula reads
//! - [`Value`], [`format_number`] - Evaluated values and their display form

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod eval;
mod range;
mod resolve;
mod value;

pub use cell::{Cell, Grid, GridView};
pub use cell_ref::{COLUMN_LETTERS, CellRef, DecodedRef, INVALID_ROW, InvalidPosition};
pub use cycle::{CycleGuard, Resolving, detect_cycle};
pub use deps::extract_references;
pub use eval::{Evaluator, Formula, evaluate, evaluate_cell};
pub use range::Range;
pub use resolve::{parse_literal, populated_ref};
pub use value::{Value, format_number};
