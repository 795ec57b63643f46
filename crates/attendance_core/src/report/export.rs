//! CSV export of the full record collection.
//!
//! # Invariants
//! - Header row is always `student_name,date,status,remarks`.
//! - Rows follow storage order. An existing file at the target is overwritten.

use crate::model::record::AttendanceRecord;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 4] = ["student_name", "date", "status", "remarks"];

/// Failure while writing a CSV export.
#[derive(Debug)]
pub struct ExportError {
    pub path: PathBuf,
    pub source: csv::Error,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to export csv to `{}`: {}", self.path.display(), self.source)
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Writes `records` to `out_path` and returns the path written.
pub fn export_csv(out_path: &Path, records: &[AttendanceRecord]) -> Result<PathBuf, ExportError> {
    match write_rows(out_path, records) {
        Ok(()) => {
            info!(
                "event=csv_export module=report status=ok rows={} path={}",
                records.len(),
                out_path.display()
            );
            Ok(out_path.to_path_buf())
        }
        Err(source) => {
            error!(
                "event=csv_export module=report status=error path={} error={}",
                out_path.display(),
                source
            );
            Err(ExportError {
                path: out_path.to_path_buf(),
                source,
            })
        }
    }
}

fn write_rows(out_path: &Path, records: &[AttendanceRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(out_path)?;
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.student_name(),
            record.date(),
            record.status().as_str(),
            record.remarks(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
