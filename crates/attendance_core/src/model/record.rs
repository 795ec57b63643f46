//! Attendance record domain model.
//!
//! # Responsibility
//! - Define the canonical attendance entry persisted by the store.
//! - Own normalization and validation of raw shell input.
//!
//! # Invariants
//! - `AttendanceRecord` values are only produced by
//!   `RawAttendanceRecord::normalize_and_validate` or by loading the backing file.
//! - Validation order is fixed: date, status, remarks, name. First failure wins.
//! - `date` is stored zero-padded as `YYYY-MM-DD` so string order is date order.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Canonical date layout for stored records and range filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("valid date shape regex")
});

/// Attendance state for one student on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    /// Requires non-empty remarks.
    Absent,
    Late,
}

impl AttendanceStatus {
    /// Every status in menu order.
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = RecordValidationError;

    /// Parses an already-normalized status name (`Present|Absent|Late`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| RecordValidationError::InvalidStatus(value.to_string()))
    }
}

/// Validation failures for attendance input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Date did not parse as a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Normalized status is not one of `AttendanceStatus::ALL`.
    InvalidStatus(String),
    /// Status is `Absent` but remarks are empty.
    MissingRemarks,
    /// Student name is empty after trimming.
    EmptyName,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(
                f,
                "date `{value}` must be in YYYY-MM-DD format, e.g. 2025-08-24"
            ),
            Self::InvalidStatus(value) => write!(
                f,
                "status `{value}` must be one of: Present, Absent, Late"
            ),
            Self::MissingRemarks => write!(f, "remarks are required when the student is Absent"),
            Self::EmptyName => write!(f, "student name cannot be empty"),
        }
    }
}

impl Error for RecordValidationError {}

impl RecordValidationError {
    /// Stable snake_case identifier for logs and shell mapping.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidStatus(_) => "invalid_status",
            Self::MissingRemarks => "missing_remarks",
            Self::EmptyName => "empty_name",
        }
    }
}

/// Unvalidated attendance input as collected by a shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAttendanceRecord {
    pub student_name: String,
    pub date: String,
    pub status: String,
    pub remarks: String,
}

impl RawAttendanceRecord {
    pub fn new(
        student_name: impl Into<String>,
        date: impl Into<String>,
        status: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            date: date.into(),
            status: status.into(),
            remarks: remarks.into(),
        }
    }

    /// Applies trimming and casing rules without validating.
    pub fn normalized(&self) -> Self {
        Self {
            student_name: title_case(self.student_name.trim()),
            date: self.date.trim().to_string(),
            status: capitalize(self.status.trim()),
            remarks: self.remarks.trim().to_string(),
        }
    }

    /// Normalizes this input and checks every record-level invariant.
    ///
    /// # Errors
    /// - `InvalidDate` when the date is not a real `YYYY-MM-DD` date in years 1..=9999.
    /// - `InvalidStatus` when the normalized status is unknown.
    /// - `MissingRemarks` when an `Absent` entry has no remarks.
    /// - `EmptyName` when the name is blank.
    pub fn normalize_and_validate(&self) -> Result<AttendanceRecord, RecordValidationError> {
        let normalized = self.normalized();

        let date = canonical_date(&normalized.date)?;
        let status = normalized.status.parse::<AttendanceStatus>()?;
        if status == AttendanceStatus::Absent && normalized.remarks.is_empty() {
            return Err(RecordValidationError::MissingRemarks);
        }
        if normalized.student_name.is_empty() {
            return Err(RecordValidationError::EmptyName);
        }

        Ok(AttendanceRecord {
            student_name: normalized.student_name,
            date,
            status,
            remarks: normalized.remarks,
        })
    }
}

impl From<&AttendanceRecord> for RawAttendanceRecord {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            student_name: record.student_name.clone(),
            date: record.date.clone(),
            status: record.status.as_str().to_string(),
            remarks: record.remarks.clone(),
        }
    }
}

/// Free-function form of `RawAttendanceRecord::normalize_and_validate`.
pub fn normalize_and_validate(
    raw: &RawAttendanceRecord,
) -> Result<AttendanceRecord, RecordValidationError> {
    raw.normalize_and_validate()
}

/// One accepted attendance entry.
///
/// Serialized with the on-disk keys `student_name, date, status, remarks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    student_name: String,
    date: String,
    status: AttendanceStatus,
    #[serde(default)]
    remarks: String,
}

impl AttendanceRecord {
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// `YYYY-MM-DD` for validated records. Loaded records are kept verbatim.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// Parsed calendar date, or `None` when the stored text is not a valid date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Case-insensitive name comparison against an already lower-cased key.
    pub(crate) fn is_student(&self, lowered_name: &str) -> bool {
        self.student_name.to_lowercase() == lowered_name
    }

    /// Whether `other` occupies the same `(name, date)` slot.
    ///
    /// Dates that both parse compare as calendar days, so an unpadded
    /// `2025-8-4` in an older file still collides with `2025-08-04`.
    pub(crate) fn same_slot(&self, other: &AttendanceRecord) -> bool {
        let same_date = match (self.calendar_date(), other.calendar_date()) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => self.date == other.date,
        };
        same_date && self.is_student(&other.student_name.to_lowercase())
    }
}

fn canonical_date(value: &str) -> Result<String, RecordValidationError> {
    let invalid = || RecordValidationError::InvalidDate(value.to_string());
    if !DATE_SHAPE_RE.is_match(value) {
        return Err(invalid());
    }
    let parsed = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    if !(1..=9999).contains(&parsed.year()) {
        return Err(invalid());
    }
    Ok(parsed.format(DATE_FORMAT).to_string())
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `o'neil` becomes `O'Neil`.
fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if previous_is_letter {
            output.extend(ch.to_lowercase());
        } else {
            output.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_lowercase() || ch.is_uppercase();
    }
    output
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
