use crate::config::SheetConfig;
use leansheet_engine::engine::{CellRef, Grid, GridView, Range};

/// UI-agnostic document state for the spreadsheet.
///
/// Owns the cells and the sheet dimensions. Displayed values are never
/// stored; they are evaluated from the raw text on request.
pub struct Document {
    /// Sparse cell storage (DashMap is internally sharded, reads don't block each other)
    pub grid: Grid,
    /// Number of rows in the sheet
    pub rows: usize,
    /// Number of columns in the sheet, at most one per letter
    pub columns: usize,
    /// Whether the grid has been modified
    pub modified: bool,
}

impl Document {
    /// Create an empty document with default dimensions.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_config(SheetConfig::default())
    }

    pub fn with_config(config: SheetConfig) -> Self {
        Document {
            grid: Grid::new(),
            rows: config.rows,
            columns: config.columns,
            modified: false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl GridView for Document {
    fn cell_text(&self, at: &CellRef) -> Option<String> {
        if !self.contains(at) {
            return None;
        }
        self.grid.cell_text(at)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    fn populated_in(&self, range: &Range) -> Vec<CellRef> {
        let mut cells = self.grid.populated_in(range);
        cells.retain(|cell| self.contains(cell));
        cells
    }
}
