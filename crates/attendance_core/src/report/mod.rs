//! Read-only reports over the record collection.
//!
//! # Responsibility
//! - Compute per-student monthly attendance percentages.
//! - Export the collection as CSV.
//!
//! # Invariants
//! - Reports never mutate records and never fail on malformed stored dates.

pub mod export;
pub mod monthly;
