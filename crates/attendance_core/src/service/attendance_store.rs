//! Attendance store use-case service.
//!
//! # Responsibility
//! - Provide the entry points a shell calls: add, list, monthly report, export.
//! - Enforce record validation and `(name, date)` uniqueness before any write.
//!
//! # Invariants
//! - Rejected input never reaches the repository.
//! - Queries are pure reads over the in-memory collection.
//! - Rejects strictly on write, degrades gracefully on read.

use crate::config::{AttendanceConfig, DEFAULT_EXPORT_FILE};
use crate::model::record::{AttendanceRecord, RawAttendanceRecord, RecordValidationError};
use crate::repo::record_repo::{
    JsonFileRecordRepository, LoadStatus, RecordFilter, RecordRepository, RepoError,
};
use crate::report::export::{export_csv, ExportError};
use crate::report::monthly::{monthly_summary, MonthlySummary};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error returned to shells.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    /// A record for the same student (case-insensitive) and date exists.
    DuplicateRecord { student_name: String, date: String },
    Repo(RepoError),
    Export(ExportError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateRecord { student_name, date } => {
                write!(f, "attendance already exists for {student_name} on {date}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateRecord { .. } => None,
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for StoreError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Owner of the attendance collection and its persistence.
#[derive(Debug)]
pub struct AttendanceStore<R: RecordRepository = JsonFileRecordRepository> {
    repo: R,
    export_file: PathBuf,
}

impl AttendanceStore<JsonFileRecordRepository> {
    /// Opens the JSON backing file at `path`, creating it when missing.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(JsonFileRecordRepository::open(path)?))
    }

    /// Opens `config.data_file` and exports to `config.export_file` by default.
    pub fn open_with_config(config: &AttendanceConfig) -> StoreResult<Self> {
        let repo = JsonFileRecordRepository::open(&config.data_file)?;
        Ok(Self {
            repo,
            export_file: config.export_file.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    pub fn load_status(&self) -> LoadStatus {
        self.repo.load_status()
    }
}

impl<R: RecordRepository> AttendanceStore<R> {
    /// Wraps an already-loaded repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }

    /// Validates `candidate`, checks uniqueness and persists it.
    ///
    /// # Errors
    /// - `Validation` for any record-level invariant failure.
    /// - `DuplicateRecord` when the `(name, date)` slot is taken.
    /// - `Repo` when the backing file cannot be rewritten; the record is not kept.
    pub fn add_record(&mut self, candidate: &RawAttendanceRecord) -> StoreResult<AttendanceRecord> {
        let record = match candidate.normalize_and_validate() {
            Ok(record) => record,
            Err(err) => {
                info!(
                    "event=record_add module=store status=rejected reason={}",
                    err.code()
                );
                return Err(err.into());
            }
        };

        if self
            .repo
            .records()
            .iter()
            .any(|existing| existing.same_slot(&record))
        {
            info!("event=record_add module=store status=rejected reason=duplicate_record");
            return Err(StoreError::DuplicateRecord {
                student_name: record.student_name().to_string(),
                date: record.date().to_string(),
            });
        }

        self.repo.append(record.clone())?;
        info!(
            "event=record_add module=store status=ok status_value={} records={}",
            record.status(),
            self.repo.records().len()
        );
        Ok(record)
    }

    /// Returns records matching `filter` in insertion order.
    pub fn list_records(&self, filter: &RecordFilter) -> Vec<AttendanceRecord> {
        let matches = filter.matcher();
        self.repo
            .records()
            .iter()
            .filter(|record| matches(*record))
            .cloned()
            .collect()
    }

    /// Attendance totals for `student_name` in `year`-`month` (1..=12).
    pub fn monthly_percentage(&self, student_name: &str, year: i32, month: u32) -> MonthlySummary {
        monthly_summary(self.repo.records(), student_name, year, month)
    }

    /// Writes every record to `out_path` as CSV and returns that path.
    pub fn export_csv(&self, out_path: impl AsRef<Path>) -> StoreResult<PathBuf> {
        Ok(export_csv(out_path.as_ref(), self.repo.records())?)
    }

    /// Exports to the configured export file (`attendance_export.csv` by default).
    pub fn export_csv_default(&self) -> StoreResult<PathBuf> {
        self.export_csv(&self.export_file)
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        self.repo.records()
    }

    pub fn len(&self) -> usize {
        self.repo.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.records().is_empty()
    }
}
