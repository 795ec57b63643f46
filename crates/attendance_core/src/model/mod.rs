//! Attendance domain model.
//!
//! # Responsibility
//! - Define the typed record shape shared by storage, queries and shells.
//!
//! # Invariants
//! - Records are immutable after acceptance; there is no update or delete.

pub mod record;
