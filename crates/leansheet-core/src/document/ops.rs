use super::Document;
use crate::error::{LeanSheetError, Result};
use leansheet_engine::engine::{COLUMN_LETTERS, Cell, CellRef, GridView};

impl Document {
    fn check_bounds(&self, cell_ref: &CellRef) -> Result<()> {
        if self.contains(cell_ref) {
            Ok(())
        } else {
            Err(LeanSheetError::OutOfBounds {
                cell: cell_ref.clone(),
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Set cell contents from input string. Blank input clears the cell.
    pub fn set_cell_text(&mut self, cell_ref: CellRef, input: &str) -> Result<()> {
        self.check_bounds(&cell_ref)?;
        match Cell::from_input(input) {
            Some(cell) => {
                self.grid.insert(cell_ref, cell);
            }
            None => {
                self.grid.remove(&cell_ref);
            }
        }
        self.modified = true;
        Ok(())
    }

    /// Set cell contents addressed by a label such as "B3".
    pub fn set_cell_by_label(&mut self, label: &str, input: &str) -> Result<CellRef> {
        let cell_ref = CellRef::decode(label.trim())?
            .cell_ref()
            .ok_or_else(|| LeanSheetError::InvalidReference(label.to_string()))?;
        self.set_cell_text(cell_ref.clone(), input)?;
        Ok(cell_ref)
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, cell_ref: &CellRef) {
        if self.grid.remove(cell_ref).is_some() {
            self.modified = true;
        }
    }

    /// Clear every cell, keeping the dimensions.
    pub fn clear_all(&mut self) {
        if !self.grid.is_empty() {
            self.grid.clear();
            self.modified = true;
        }
    }

    /// Raw text of a cell as shown in the editor; empty if unpopulated.
    pub fn edit_text(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|cell| cell.to_input_string())
            .unwrap_or_default()
    }

    /// Add a row at the bottom. Returns the new row count.
    pub fn append_row(&mut self) -> usize {
        self.rows += 1;
        self.modified = true;
        self.rows
    }

    /// Add a column at the right. Returns the new column count.
    pub fn append_column(&mut self) -> Result<usize> {
        if self.columns >= COLUMN_LETTERS {
            return Err(LeanSheetError::ColumnLimit(COLUMN_LETTERS));
        }
        self.columns += 1;
        self.modified = true;
        Ok(self.columns)
    }
}
