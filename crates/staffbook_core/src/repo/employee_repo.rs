//! Employee repository contract and blob-store implementation.
//!
//! # Responsibility
//! - Own the persisted representation: one key holding a JSON array.
//! - Load fail-soft, save fail-loud.
//!
//! # Invariants
//! - `save_all` replaces the whole collection in a single `set`.
//! - `load_all` never fails; unreadable or malformed state yields an empty
//!   collection and a log event.
//! - Loaded records must pass the structural `Employee::validate()` and
//!   carry unique ids, otherwise the stored blob is treated as malformed.
//!   Draft input rules (name pattern and length) are not applied on load.

use crate::model::employee::Employee;
use crate::store::{KvStore, StoreError};
use log::{debug, error, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default blob-store key for the employee collection.
pub const STORAGE_KEY: &str = "employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store write failed (e.g. quota exceeded).
    Persistence(StoreError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "failed to persist employees: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize employees: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Serialization boundary between the registry and a blob store.
pub trait EmployeeRepository {
    /// Loads the full collection. Never fails; see module invariants.
    fn load_all(&self) -> Vec<Employee>;
    /// Replaces the full persisted collection.
    fn save_all(&mut self, employees: &[Employee]) -> RepoResult<()>;
}

/// `EmployeeRepository` writing a JSON array into a `KvStore`.
pub struct KvEmployeeRepository<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> KvEmployeeRepository<S> {
    /// Uses the default `STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KvStore> EmployeeRepository for KvEmployeeRepository<S> {
    fn load_all(&self) -> Vec<Employee> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=employees_load module=repo status=empty reason=missing_key");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=employees_load module=repo status=error error_code=store_read_failed error={err}"
                );
                return Vec::new();
            }
        };

        match decode_employees(&raw) {
            Ok(employees) => {
                debug!(
                    "event=employees_load module=repo status=ok count={}",
                    employees.len()
                );
                employees
            }
            Err(reason) => {
                warn!(
                    "event=employees_load module=repo status=recovered error_code=malformed_data reason={reason}"
                );
                Vec::new()
            }
        }
    }

    fn save_all(&mut self, employees: &[Employee]) -> RepoResult<()> {
        let payload = serde_json::to_string(employees)?;
        if let Err(err) = self.store.set(&self.key, &payload) {
            error!(
                "event=employees_save module=repo status=error error_code=store_write_failed count={} bytes={} error={err}",
                employees.len(),
                payload.len()
            );
            return Err(err.into());
        }

        debug!(
            "event=employees_save module=repo status=ok count={} bytes={}",
            employees.len(),
            payload.len()
        );
        Ok(())
    }
}

fn decode_employees(raw: &str) -> Result<Vec<Employee>, String> {
    let employees: Vec<Employee> =
        serde_json::from_str(raw).map_err(|err| format!("invalid json: {err}"))?;

    let mut seen = HashSet::with_capacity(employees.len());
    for (index, employee) in employees.iter().enumerate() {
        employee
            .validate()
            .map_err(|err| format!("record {index}: {err}"))?;
        if !seen.insert(employee.id.as_str()) {
            return Err(format!("record {index}: duplicate id `{}`", employee.id));
        }
    }

    Ok(employees)
}
