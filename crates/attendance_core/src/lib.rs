//! Core domain logic for the student attendance tracker.
//! This crate owns record validation, the JSON flat-file store and its reports.
//! Interactive shells depend on it and only render results.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use config::{AttendanceConfig, DEFAULT_DATA_FILE, DEFAULT_EXPORT_FILE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{
    normalize_and_validate, AttendanceRecord, AttendanceStatus, RawAttendanceRecord,
    RecordValidationError,
};
pub use repo::record_repo::{
    JsonFileRecordRepository, LoadStatus, MemoryRecordRepository, RecordFilter, RecordRepository,
    RepoError, RepoResult,
};
pub use report::export::{ExportError, CSV_HEADER};
pub use report::monthly::MonthlySummary;
pub use service::attendance_store::{AttendanceStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
