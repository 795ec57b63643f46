//! Attendance record repository contracts and JSON flat-file implementation.
//!
//! # Responsibility
//! - Own the ordered record collection and its on-disk JSON array.
//! - Keep file layout and serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Every successful write rewrites the whole backing file.
//! - A failed write leaves the in-memory collection unchanged.
//! - A backing file that does not decode is treated as an empty collection.
//!   The next successful write replaces its contents.

use crate::model::record::AttendanceRecord;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EMPTY_COLLECTION: &str = "[]";
const TEMP_SUFFIX: &str = ".tmp";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for record storage.
#[derive(Debug)]
pub enum RepoError {
    /// Filesystem failure on `path`.
    Io { path: PathBuf, source: io::Error },
    /// Backing file content is not a JSON array of attendance records.
    MalformedStorage {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Record collection could not be encoded.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::MalformedStorage { path, source } => write!(
                f,
                "malformed attendance data in `{}`: {source}",
                path.display()
            ),
            Self::Encode(err) => write!(f, "failed to encode attendance data: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MalformedStorage { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl RepoError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Query options for listing records. All filters are optional and AND together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive exact student name.
    pub student_name: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

impl RecordFilter {
    pub fn student(mut self, student_name: impl Into<String>) -> Self {
        self.student_name = Some(student_name.into());
        self
    }

    pub fn date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = Some(date.into());
        self
    }

    pub fn date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = Some(date.into());
        self
    }

    /// Returns a predicate with blank filters dropped and the name lower-cased.
    pub(crate) fn matcher(&self) -> impl Fn(&AttendanceRecord) -> bool + '_ {
        let student = non_blank(&self.student_name).map(str::to_lowercase);
        let date_from = non_blank(&self.date_from);
        let date_to = non_blank(&self.date_to);

        move |record| {
            student
                .as_deref()
                .map_or(true, |name| record.is_student(name))
                && date_from.map_or(true, |from| record.date() >= from)
                && date_to.map_or(true, |to| record.date() <= to)
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

/// How a file-backed repository obtained its initial collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Backing file did not exist and was created with an empty array.
    Created,
    /// Backing file decoded successfully.
    Loaded { records: usize },
    /// Backing file did not decode; the collection starts empty.
    RecoveredFromMalformed,
}

/// Repository interface over the ordered attendance collection.
pub trait RecordRepository {
    /// All records in insertion order.
    fn records(&self) -> &[AttendanceRecord];
    /// Appends one record and persists the collection.
    ///
    /// Implementations must leave `records()` unchanged when this fails.
    fn append(&mut self, record: AttendanceRecord) -> RepoResult<()>;
}

/// JSON flat-file repository. The whole collection lives in memory.
#[derive(Debug)]
pub struct JsonFileRecordRepository {
    path: PathBuf,
    records: Vec<AttendanceRecord>,
    load_status: LoadStatus,
}

impl JsonFileRecordRepository {
    /// Opens (or creates) the backing file at `path` and loads every record.
    ///
    /// # Side effects
    /// - Creates the parent directory when missing.
    /// - Creates the file with an empty JSON array when missing.
    /// - Emits `store_open` logging events with duration and status.
    ///
    /// # Errors
    /// - Returns `RepoError::Io` when the directory or file cannot be created or read.
    ///   Malformed content is not an error (see `LoadStatus::RecoveredFromMalformed`).
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let started_at = Instant::now();
        info!("event=store_open module=repo status=start");

        let created = match prepare_backing_file(&path) {
            Ok(created) => created,
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error duration_ms={} error_code=prepare_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let (records, load_status) = match read_records(&path) {
            Ok(records) if created => (records, LoadStatus::Created),
            Ok(records) => {
                let count = records.len();
                (records, LoadStatus::Loaded { records: count })
            }
            Err(RepoError::MalformedStorage { path, source }) => {
                warn!(
                    "event=store_recovered module=repo status=degraded path={} error={}",
                    path.display(),
                    source
                );
                (Vec::new(), LoadStatus::RecoveredFromMalformed)
            }
            Err(err) => {
                error!(
                    "event=store_open module=repo status=error duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        info!(
            "event=store_open module=repo status=ok records={} duration_ms={}",
            records.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Self {
            path,
            records,
            load_status,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }
}

impl RecordRepository for JsonFileRecordRepository {
    fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    fn append(&mut self, record: AttendanceRecord) -> RepoResult<()> {
        self.records.push(record);
        if let Err(err) = write_records(&self.path, &self.records) {
            self.records.pop();
            error!(
                "event=store_persist module=repo status=error records={} error={}",
                self.records.len(),
                err
            );
            return Err(err);
        }

        debug!(
            "event=store_persist module=repo status=ok records={}",
            self.records.len()
        );
        Ok(())
    }
}

/// Volatile repository with no backing file.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordRepository {
    records: Vec<AttendanceRecord>,
}

impl MemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordRepository for MemoryRecordRepository {
    fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    fn append(&mut self, record: AttendanceRecord) -> RepoResult<()> {
        self.records.push(record);
        Ok(())
    }
}

/// Ensures the parent directory and file exist. Returns `true` when the file was created.
fn prepare_backing_file(path: &Path) -> RepoResult<bool> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| RepoError::io(parent, err))?;
    }

    if path.exists() {
        return Ok(false);
    }

    fs::write(path, EMPTY_COLLECTION).map_err(|err| RepoError::io(path, err))?;
    Ok(true)
}

fn read_records(path: &Path) -> RepoResult<Vec<AttendanceRecord>> {
    let content = fs::read(path).map_err(|err| RepoError::io(path, err))?;
    serde_json::from_slice(&content).map_err(|source| RepoError::MalformedStorage {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites the whole collection through a sibling temp file and a rename.
fn write_records(path: &Path, records: &[AttendanceRecord]) -> RepoResult<()> {
    let encoded = serde_json::to_string_pretty(records).map_err(RepoError::Encode)?;

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(TEMP_SUFFIX);
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, encoded).map_err(|err| RepoError::io(&temp_path, err))?;
    fs::rename(&temp_path, path).map_err(|err| RepoError::io(path, err))
}
