//! Operand resolution.
//!
//! An operand is either a reference to a populated cell, whose evaluated
//! value is used, or a numeric literal. Everything else reads as 0.

use super::range::addressable;
use super::{CellRef, CycleGuard, Evaluator, GridView};

impl Evaluator<'_> {
    /// Resolve `token` to a number, evaluating a referenced cell if needed.
    pub(crate) fn resolve(&self, token: &str, guard: &mut CycleGuard) -> f64 {
        match populated_ref(token, self.grid) {
            Some(cell) => self.cell_value(&cell, guard).as_number(),
            None => parse_literal(token),
        }
    }
}

/// The populated cell `token` refers to, if any.
pub fn populated_ref(token: &str, grid: &dyn GridView) -> Option<CellRef> {
    addressable(token, grid).filter(|cell| grid.cell_text(cell).is_some())
}

/// Parse a numeric literal, reading anything unparsable as 0.
pub fn parse_literal(token: &str) -> f64 {
    token.trim().parse::<f64>().unwrap_or(0.0)
}
