//! Employee domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the registry and repository.
//! - Keep validation rules independent of any presentation concern.
//!
//! # Invariants
//! - Every stored record is identified by a registry-assigned `EmployeeId`.
//! - Deletion is a hard delete gated by `EmployeeStatus::is_deletable`.

pub mod employee;
pub mod validation;
