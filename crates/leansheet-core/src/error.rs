//! Error types for LeanSheet core.

use leansheet_engine::engine::{CellRef, InvalidPosition};
use thiserror::Error;

/// Errors that can occur while editing or configuring a sheet.
///
/// Formula evaluation never fails; these cover the surfaces around it.
#[derive(Error, Debug)]
pub enum LeanSheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidPosition(#[from] InvalidPosition),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Cell {cell} is outside the {rows}x{columns} sheet")]
    OutOfBounds {
        cell: CellRef,
        rows: usize,
        columns: usize,
    },

    #[error("Sheet already has the maximum of {0} columns")]
    ColumnLimit(usize),
}

pub type Result<T> = std::result::Result<T, LeanSheetError>;
