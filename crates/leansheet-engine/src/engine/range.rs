//! Bounding ranges derived from aggregate operands.
//!
//! `sum= A1 B4 A2` covers the rectangle spanned by every operand that
//! addresses a cell, here `A1:B4`. Operands that are literals or fall outside
//! the grid do not widen the range. A range may be far larger than what is
//! stored; evaluation visits [`GridView::populated_in`] rather than every cell.

use std::fmt;

use super::{CellRef, GridView};

/// An inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl Range {
    /// Derive the range spanned by `tokens`. None if no token addresses a cell
    /// inside the grid.
    pub fn derive<'t, I>(tokens: I, grid: &dyn GridView) -> Option<Range>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        for token in tokens {
            let Some(cell) = addressable(token, grid) else {
                continue;
            };
            rows.push(cell.row);
            cols.push(cell.col);
        }

        rows.sort_unstable();
        cols.sort_unstable();
        Some(Range {
            first_row: *rows.first()?,
            last_row: *rows.last()?,
            first_col: *cols.first()?,
            last_col: *cols.last()?,
        })
    }

    pub fn contains(&self, at: &CellRef) -> bool {
        (self.first_row..=self.last_row).contains(&at.row)
            && (self.first_col..=self.last_col).contains(&at.col)
    }

    /// Every cell in the range, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + use<> {
        let (first_col, last_col) = (self.first_col, self.last_col);
        (self.first_row..=self.last_row)
            .flat_map(move |row| (first_col..=last_col).map(move |col| CellRef::new(col, row)))
    }
}

/// The cell a token addresses, if it decodes to a position inside the grid.
pub(crate) fn addressable(token: &str, grid: &dyn GridView) -> Option<CellRef> {
    let cell = CellRef::decode(token).ok()?.cell_ref()?;
    grid.contains(&cell).then_some(cell)
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            CellRef::new(self.first_col, self.first_row),
            CellRef::new(self.last_col, self.last_row)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Cell, Grid};
    use dashmap::DashMap;

    fn grid_with_rows(rows: usize) -> Grid {
        let grid: Grid = DashMap::new();
        grid.insert(CellRef::new(0, rows - 1), Cell::new("x"));
        grid
    }

    #[test]
    fn test_derive_spans_all_references() {
        let grid = grid_with_rows(10);
        let range = Range::derive(["B4", "a1", "C2"], &grid).unwrap();
        assert_eq!(
            range,
            Range {
                first_row: 0,
                last_row: 3,
                first_col: 0,
                last_col: 2,
            }
        );
        assert_eq!(range.to_string(), "A1:C4");
        assert_eq!(range.cells().count(), 12);
    }

    /// A sheet with fixed bounds and no contents.
    struct Bounded(usize, usize);

    impl GridView for Bounded {
        fn cell_text(&self, _at: &CellRef) -> Option<String> {
            None
        }

        fn dimensions(&self) -> (usize, usize) {
            (self.0, self.1)
        }
    }

    #[test]
    fn test_derive_ignores_literals_and_out_of_grid_refs() {
        let sheet = Bounded(5, 3);
        let range = Range::derive(["5", "hello", "A2", "B99", "D1", "A3"], &sheet).unwrap();
        assert_eq!(range.to_string(), "A2:A3");
    }

    #[test]
    fn test_derive_on_bare_grid_spans_past_populated_rows() {
        let grid = grid_with_rows(3);
        let range = Range::derive(["A1", "A10"], &grid).unwrap();
        assert_eq!(range.to_string(), "A1:A10");

        let range = Range::derive(["B99", "A2"], &grid).unwrap();
        assert_eq!(range.to_string(), "A2:B99");
    }

    #[test]
    fn test_derive_without_references_is_none() {
        let grid = grid_with_rows(5);
        assert!(Range::derive(["1", "2.5"], &grid).is_none());
        assert!(Range::derive(std::iter::empty::<&str>(), &grid).is_none());
    }

    #[test]
    fn test_cells_row_major() {
        let range = Range {
            first_row: 0,
            last_row: 1,
            first_col: 1,
            last_col: 2,
        };
        let cells: Vec<String> = range.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["B1", "C1", "B2", "C2"]);
        assert!(range.contains(&CellRef::new(2, 1)));
        assert!(!range.contains(&CellRef::new(0, 0)));
    }
}
