//! Sheet configuration.
//!
//! Read from `sheet.toml` in the user's config directory, or from an explicit
//! path:
//!
//! ```toml
//! rows = 100
//! columns = 12
//! ```
//!
//! Missing keys take their defaults. Columns are capped at one per letter.

use directories::ProjectDirs;
use leansheet_engine::engine::COLUMN_LETTERS;
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{LeanSheetError, Result};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

pub const DEFAULT_ROWS: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: DEFAULT_ROWS,
            columns: COLUMN_LETTERS,
        }
    }
}

impl SheetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SheetConfig = toml::from_str(content)?;
        Ok(config.clamped())
    }

    /// Load a config file, refusing anything over 1 MiB.
    pub fn load(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(LeanSheetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: config file too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_CONFIG_FILE_BYTES
                ),
            )));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Default location of the user's config file.
    pub fn user_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("", "", "leansheet")?;
        let mut path = proj.config_dir().to_path_buf();
        path.push("sheet.toml");
        Some(path)
    }

    /// Load `path` (or the user config when None), falling back to defaults.
    /// Problems are returned as warnings rather than errors.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let explicit = path.is_some();
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::user_path) else {
            return (Self::default(), warnings);
        };

        if !path.exists() {
            if explicit {
                warnings.push(format!("Config file not found: {}", path.display()));
            }
            return (Self::default(), warnings);
        }

        match Self::load(&path) {
            Ok(config) => (config, warnings),
            Err(err) => {
                warn!("ignoring {}: {}", path.display(), err);
                warnings.push(format!("Failed to load {}: {}", path.display(), err));
                (Self::default(), warnings)
            }
        }
    }

    fn clamped(mut self) -> Self {
        self.columns = self.columns.min(COLUMN_LETTERS);
        self
    }
}
