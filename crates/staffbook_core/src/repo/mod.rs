//! Repository layer: employee collection persistence.
//!
//! # Responsibility
//! - Define the serialization boundary used by the registry.
//! - Isolate JSON encoding and blob-store details from business rules.
//!
//! # Invariants
//! - The repository holds no copy of the collection between calls.

pub mod employee_repo;
