//! Monthly attendance percentage.

use crate::model::record::{AttendanceRecord, AttendanceStatus};
use chrono::Datelike;

/// Attendance totals for one student in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummary {
    /// Records marked for the student in the month, any status.
    pub total_days: usize,
    /// Records with status `Present`.
    pub present_days: usize,
    /// `present_days / total_days * 100`, rounded to 2 decimals with ties to even.
    /// `0.0` when empty.
    pub percentage: f64,
}

impl MonthlySummary {
    pub fn new(total_days: usize, present_days: usize) -> Self {
        Self {
            total_days,
            present_days,
            percentage: percentage(present_days, total_days),
        }
    }
}

/// Summarizes `student_name`'s records for `year`-`month`.
///
/// Name matching is case-insensitive on the trimmed input. Records whose
/// stored date does not parse are skipped.
pub fn monthly_summary(
    records: &[AttendanceRecord],
    student_name: &str,
    year: i32,
    month: u32,
) -> MonthlySummary {
    let student = student_name.trim().to_lowercase();
    let (total_days, present_days) = records
        .iter()
        .filter(|record| record.is_student(&student))
        .filter(|record| {
            record
                .calendar_date()
                .is_some_and(|date| date.year() == year && date.month() == month)
        })
        .fold((0, 0), |(total, present), record| {
            let is_present = record.status() == AttendanceStatus::Present;
            (total + 1, present + usize::from(is_present))
        });

    MonthlySummary::new(total_days, present_days)
}

fn percentage(present_days: usize, total_days: usize) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    let raw = present_days as f64 / total_days as f64 * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}
