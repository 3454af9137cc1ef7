//! Reference extraction from formula text.
//!
//! Lists the cells a formula reads when evaluated, following the same
//! classification the evaluator uses:
//! - Binary formulas read each operand that addresses a cell: `A1 + 3`
//! - `sqrt=` reads its first operand
//! - Range keywords read every populated cell of the derived range except
//!   the formula's own cell: `sum= A1 B3`
//! - Anything else reads nothing

use super::{CellRef, Formula, GridView, Range};
use super::range::addressable;
use crate::functions::Aggregate;

/// Extract the cells that `raw`, stored at `at`, depends on.
pub fn extract_references(raw: &str, at: &CellRef, grid: &dyn GridView) -> Vec<CellRef> {
    match Formula::parse(raw) {
        Formula::Plain => Vec::new(),
        Formula::Binary { left, right, .. } => [left, right]
            .into_iter()
            .filter_map(|token| addressable(token, grid))
            .collect(),
        Formula::Aggregate {
            function: Aggregate::Sqrt,
            operands,
        } => operands
            .first()
            .and_then(|token| addressable(token, grid))
            .into_iter()
            .collect(),
        Formula::Aggregate { operands, .. } => match Range::derive(operands, grid) {
            Some(range) => {
                let mut cells = grid.populated_in(&range);
                cells.retain(|cell| cell != at);
                cells
            }
            None => Vec::new(),
        },
    }
}
