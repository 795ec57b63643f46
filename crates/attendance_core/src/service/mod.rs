//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, repository writes and reports into shell-facing APIs.
//! - Keep shells decoupled from storage details.

pub mod attendance_store;
