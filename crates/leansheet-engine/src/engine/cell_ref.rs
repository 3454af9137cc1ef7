//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style labels
//! (e.g., "A1", "c12") and zero-indexed row/column coordinates. A column is
//! a single letter, so a sheet is at most [`COLUMN_LETTERS`] columns wide.
//!
//! Two decoders are available:
//! - [`CellRef::decode`] is permissive. Formula tokens may be references or
//!   literals, so anything non-empty decodes to raw coordinates and the
//!   caller decides whether they address a cell.
//! - [`CellRef::from_str`] is strict and only accepts well-formed labels.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Number of addressable columns, one per letter.
pub const COLUMN_LETTERS: usize = 26;

/// Row produced by [`CellRef::decode`] when the label has no usable row number.
pub const INVALID_ROW: i64 = -1;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Raw coordinates from [`CellRef::decode`]. Either component may be negative.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedRef {
    pub row: i64,
    pub col: i64,
}

/// Returned by [`CellRef::decode`] for an empty label.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("Invalid position: empty cell label")]
pub struct InvalidPosition;

impl DecodedRef {
    /// The addressed cell, if both coordinates land inside the column alphabet.
    pub fn cell_ref(&self) -> Option<CellRef> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (col < COLUMN_LETTERS).then(|| CellRef::new(col, row))
    }
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Decode a label case-insensitively.
    ///
    /// The first character is the column (`A` = 0); characters outside
    /// `A..=Z` land below zero. The remainder is a 1-based row number; when it
    /// does not parse, the row is [`INVALID_ROW`].
    pub fn decode(label: &str) -> Result<DecodedRef, InvalidPosition> {
        let mut chars = label.chars();
        let first = chars.next().ok_or(InvalidPosition)?;

        let col = if first.is_ascii() {
            i64::from(first.to_ascii_uppercase() as u8) - i64::from(b'A')
        } else {
            -1
        };
        let row = chars
            .as_str()
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .unwrap_or(INVALID_ROW);

        Ok(DecodedRef { row, col })
    }

    /// Label for this cell, e.g. `A1` for (0, 0). Columns past the alphabet
    /// render as `?` and do not decode back.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a well-formed label such as "A1" or "z40".
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = label_re().captures(name)?;
        let letter = caps["letter"].to_ascii_uppercase();
        let col = (letter.as_bytes()[0] - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Letter for a column index (0 -> A, 25 -> Z). None past the alphabet.
    pub fn col_letter(col: usize) -> Option<char> {
        (col < COLUMN_LETTERS).then(|| char::from(b'A' + col as u8))
    }
}

fn label_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Za-z])(?<number>[0-9]+)$").expect("cell label regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "?{}", self.row + 1),
        }
    }
}
