//! leansheet_engine - Formula evaluation for a simpler spreadsheet.

pub mod engine;
pub mod functions;
