//! Cell data structures for the spreadsheet grid.
//!
//! - [`Cell`] - Raw formula text as typed by the user
//! - [`Grid`] - Thread-safe sparse storage for cells (backed by `DashMap`)
//! - [`GridView`] - The read-only capability the evaluator needs from a grid owner

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::cell_ref::{COLUMN_LETTERS, CellRef};
use super::range::Range;

/// A cell in the spreadsheet grid.
///
/// Only the raw text is stored. The displayed value is recomputed from it on
/// every read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub raw: String,
}

impl Cell {
    pub fn new(raw: &str) -> Cell {
        Cell {
            raw: raw.to_string(),
        }
    }

    /// Parse user input. Blank input yields None (the cell should be cleared).
    pub fn from_input(input: &str) -> Option<Cell> {
        if input.trim().is_empty() {
            None
        } else {
            Some(Cell::new(input))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Get the string shown in the editor for this cell.
    pub fn to_input_string(&self) -> String {
        self.raw.clone()
    }
}

/// Thread-safe sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;

/// Read access to a grid, as seen by the evaluator.
pub trait GridView {
    /// Raw text of a populated cell. Unpopulated and empty cells are None.
    fn cell_text(&self, at: &CellRef) -> Option<String>;

    /// `(rows, columns)` of the addressable area.
    fn dimensions(&self) -> (usize, usize);

    /// Whether `at` lies inside the addressable area.
    fn contains(&self, at: &CellRef) -> bool {
        let (rows, cols) = self.dimensions();
        at.row < rows && at.col < cols
    }

    /// Populated cells inside `range`, row by row.
    fn populated_in(&self, range: &Range) -> Vec<CellRef> {
        range
            .cells()
            .filter(|cell| self.contains(cell) && self.cell_text(cell).is_some())
            .collect()
    }
}

/// A bare grid has no row limit; only the column alphabet bounds it.
impl GridView for Grid {
    fn cell_text(&self, at: &CellRef) -> Option<String> {
        self.get(at)
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.raw.clone())
    }

    fn dimensions(&self) -> (usize, usize) {
        (usize::MAX, COLUMN_LETTERS)
    }

    fn contains(&self, at: &CellRef) -> bool {
        at.col < COLUMN_LETTERS
    }

    /// Walks the stored cells rather than the rectangle, so a range such as
    /// `A1:A999999999` costs no more than the grid holds.
    fn populated_in(&self, range: &Range) -> Vec<CellRef> {
        let mut cells: Vec<CellRef> = self
            .iter()
            .filter(|entry| range.contains(entry.key()) && !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        cells.sort_by_key(|cell| (cell.row, cell.col));
        cells
    }
}
