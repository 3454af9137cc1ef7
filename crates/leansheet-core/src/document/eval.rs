use super::Document;
use leansheet_engine::engine::{CellRef, Value, detect_cycle, evaluate_cell};

impl Document {
    /// Evaluate a cell for display. Nothing is cached; every call recomputes
    /// from the raw text.
    pub fn display(&self, cell_ref: &CellRef) -> Value {
        evaluate_cell(self, cell_ref)
    }

    /// The text drawn in the grid for a cell.
    pub fn display_string(&self, cell_ref: &CellRef) -> String {
        self.display(cell_ref).to_string()
    }

    /// Status line for the selected cell.
    pub fn cell_label(&self, cell_ref: &CellRef) -> String {
        format!("Cell: ({})", cell_ref)
    }

    /// Reference path of a cycle through `cell_ref`, if there is one.
    pub fn cycle_at(&self, cell_ref: &CellRef) -> Option<Vec<CellRef>> {
        detect_cycle(cell_ref, self)
    }
}
