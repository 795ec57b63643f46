//! Default file locations and logging settings.
//!
//! # Invariants
//! - Defaults are relative to the working directory, matching a local
//!   single-user install.

use crate::logging::{default_log_level, init_logging, LoggingError};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/attendance.json";
pub const DEFAULT_EXPORT_FILE: &str = "attendance_export.csv";

const DATA_FILE_NAME: &str = "attendance.json";

/// Locations and log level used to open an attendance store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceConfig {
    /// JSON array backing file.
    pub data_file: PathBuf,
    /// Target of `AttendanceStore::export_csv_default`.
    pub export_file: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            log_level: default_log_level().to_string(),
        }
    }
}

impl AttendanceConfig {
    /// Places the data file and export file directly under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DATA_FILE_NAME),
            export_file: dir.join(DEFAULT_EXPORT_FILE),
            ..Self::default()
        }
    }

    /// Starts file logging under `log_dir` at the configured `log_level`.
    pub fn init_logging(&self, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
        init_logging(&self.log_level, log_dir)
    }
}
