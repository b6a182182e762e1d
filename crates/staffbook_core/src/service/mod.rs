//! Core use-case services.
//!
//! # Responsibility
//! - Own the employee collection and orchestrate repository writes.
//! - Keep presentation callers decoupled from storage details.

pub mod employee_query;
pub mod employee_registry;
pub mod id_policy;
