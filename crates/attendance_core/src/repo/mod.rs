//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the attendance store writes through.
//! - Isolate file layout and JSON encoding from validation and queries.
//!
//! # Invariants
//! - Repositories never validate; the store only hands them accepted records.
//! - Reads degrade gracefully, writes fail loudly.

pub mod record_repo;
