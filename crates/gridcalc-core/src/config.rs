//! Sheet configuration loaded from `config.toml`.
//!
//! ```toml
//! rows = 25
//! cols = 10
//! sample_data = true
//! ```

use directories::ProjectDirs;
use gridcalc_engine::engine::MAX_REFERENCE_COLUMNS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GridcalcError, Result};
use crate::sample::{SAMPLE_SHEET_COLS, SAMPLE_SHEET_ROWS};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

pub const DEFAULT_ROWS: usize = 25;
pub const DEFAULT_COLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Number of rows in the sheet.
    pub rows: usize,
    /// Number of columns in the sheet (at most 26, `A`..`Z`).
    pub cols: usize,
    /// Seed new documents with the sample dataset.
    pub sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            sample_data: false,
        }
    }
}

impl Config {
    /// Parse config text. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Config> {
        toml::from_str(content).map_err(|err| GridcalcError::Config {
            path: origin.to_string(),
            message: err.to_string(),
        })
    }

    /// Clamp dimensions into the supported range, returning a warning per fix.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.rows == 0 {
            warnings.push("rows must be at least 1; using 1".to_string());
            self.rows = 1;
        }
        if self.cols == 0 {
            warnings.push("cols must be at least 1; using 1".to_string());
            self.cols = 1;
        }
        if self.cols > MAX_REFERENCE_COLUMNS {
            warnings.push(format!(
                "cols = {} exceeds the {} columns addressable as A..Z; using {}",
                self.cols, MAX_REFERENCE_COLUMNS, MAX_REFERENCE_COLUMNS
            ));
            self.cols = MAX_REFERENCE_COLUMNS;
        }
        if self.sample_data && (self.rows < SAMPLE_SHEET_ROWS || self.cols < SAMPLE_SHEET_COLS) {
            warnings.push(format!(
                "sample_data needs a {}x{} sheet; growing {}x{} to fit",
                SAMPLE_SHEET_ROWS, SAMPLE_SHEET_COLS, self.rows, self.cols
            ));
            self.rows = self.rows.max(SAMPLE_SHEET_ROWS);
            self.cols = self.cols.max(SAMPLE_SHEET_COLS);
        }
        warnings
    }
}

fn read_config_file(path: &Path) -> Result<Config> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(GridcalcError::Config {
            path: path.display().to_string(),
            message: format!(
                "file too large ({} bytes, max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Config::from_toml_str(&content, &path.display().to_string())
}

/// Load configuration from `config_file`, or from the user config dir.
///
/// Never fails: problems are reported as warnings and defaults are used.
/// A missing default config file is not a problem; a missing explicit one is.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let mut config = match config_path.as_ref() {
        Some(path) if path.exists() => match read_config_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                warnings.push(format!("Failed to load {}: {}", path.display(), err));
                Config::default()
            }
        },
        Some(path) if config_file.is_some() => {
            warnings.push(format!("Config file not found: {}", path.display()));
            Config::default()
        }
        _ => Config::default(),
    };

    warnings.extend(config.normalize());
    (config, warnings)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
