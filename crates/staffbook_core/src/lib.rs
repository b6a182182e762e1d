//! Core domain logic for StaffBook employee records.
//! This crate is the single source of truth for employee invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{
    Department, Employee, EmployeeDraft, EmployeeId, EmployeeStatus, Position,
};
pub use model::validation::{
    validate_draft, validate_stored, EmployeeField, FieldViolation, ValidationErrors, ViolationKind,
};
pub use repo::employee_repo::{
    EmployeeRepository, KvEmployeeRepository, RepoError, RepoResult, STORAGE_KEY,
};
pub use service::employee_query::{format_salary, EmployeeListQuery, EmployeeListResult};
pub use service::employee_registry::{
    EmployeeRegistry, RegistryError, RegistryEvent, RegistryResult,
};
pub use service::id_policy::{IdPolicy, IdPolicyError};
pub use store::{KvStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
