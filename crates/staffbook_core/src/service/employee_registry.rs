//! Employee registry: the single owner of the in-memory collection.
//!
//! # Responsibility
//! - Load the collection once from the repository.
//! - Apply add/update/delete and persist the full collection after each one.
//! - Record explicit change events for the presentation layer.
//!
//! # Invariants
//! - Ids are unique within the collection and never supplied by callers.
//! - Mutations are all-or-nothing: if persistence fails, in-memory state,
//!   `revision` and the event queue are left exactly as before the call.
//! - Only records whose status is deletable can be removed.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeStatus};
use crate::model::validation::ValidationErrors;
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use crate::service::employee_query::{EmployeeListQuery, EmployeeListResult};
use crate::service::id_policy::IdPolicy;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure of a registry operation.
#[derive(Debug)]
pub enum RegistryError {
    /// The store write failed; no change was applied.
    Persistence(RepoError),
    NotFound(EmployeeId),
    /// Business rule violation, e.g. deleting an active employee.
    InvalidOperation {
        id: EmployeeId,
        status: EmployeeStatus,
    },
    /// No free id was found within the policy's retry budget.
    IdExhausted { attempts: u32 },
    Validation(ValidationErrors),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidOperation { id, status } => write!(
                f,
                "employee {id} cannot be deleted while in status `{}`; only probation or resigned employees can be deleted",
                status.as_str()
            ),
            Self::IdExhausted { attempts } => {
                write!(f, "no unused employee id found after {attempts} attempts")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RegistryError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

impl From<ValidationErrors> for RegistryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Change notification emitted after each successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    Added(Employee),
    Updated(Employee),
    Deleted(EmployeeId),
}

/// Owner of the authoritative employee collection.
pub struct EmployeeRegistry<R: EmployeeRepository> {
    repo: R,
    employees: Vec<Employee>,
    id_policy: IdPolicy,
    rng: StdRng,
    events: Vec<RegistryEvent>,
    revision: u64,
}

impl<R: EmployeeRepository> EmployeeRegistry<R> {
    /// Creates the registry and loads the persisted collection.
    pub fn new(repo: R) -> Self {
        let employees = repo.load_all();
        info!(
            "event=registry_init module=service status=ok count={}",
            employees.len()
        );
        Self {
            repo,
            employees,
            id_policy: IdPolicy::default(),
            rng: StdRng::from_entropy(),
            events: Vec::new(),
            revision: 0,
        }
    }

    pub fn with_id_policy(mut self, policy: IdPolicy) -> Self {
        self.id_policy = policy;
        self
    }

    /// Makes id generation deterministic.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current collection in insertion order.
    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// Filtered, salary-ordered page of the current collection.
    pub fn query(&self, query: &EmployeeListQuery) -> EmployeeListResult {
        query.apply(&self.employees)
    }

    /// Number of successful mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drains pending change events in the order they happened.
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a record with a freshly generated id.
    pub fn add(&mut self, draft: EmployeeDraft) -> RegistryResult<Employee> {
        draft.validate()?;
        let id = self.next_id()?;
        let employee = draft.into_employee(id);

        let mut next = self.employees.clone();
        next.push(employee.clone());
        self.commit("add", next, RegistryEvent::Added(employee.clone()))?;

        Ok(employee)
    }

    /// Replaces every field except `id` of an existing record.
    pub fn update(&mut self, id: &str, draft: EmployeeDraft) -> RegistryResult<Employee> {
        let index = self.position_of(id)?;
        draft.validate()?;

        let mut next = self.employees.clone();
        next[index].apply(draft);
        let updated = next[index].clone();
        self.commit("update", next, RegistryEvent::Updated(updated.clone()))?;

        Ok(updated)
    }

    /// Removes a record whose status allows deletion.
    pub fn delete(&mut self, id: &str) -> RegistryResult<()> {
        let index = self.position_of(id)?;
        let status = self.employees[index].status;
        if !status.is_deletable() {
            warn!(
                "event=employee_delete module=service status=rejected id={id} error_code=status_not_deletable"
            );
            return Err(RegistryError::InvalidOperation {
                id: id.to_string(),
                status,
            });
        }

        let mut next = self.employees.clone();
        let removed = next.remove(index);
        self.commit("delete", next, RegistryEvent::Deleted(removed.id))
    }

    fn position_of(&self, id: &str) -> RegistryResult<usize> {
        self.employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    fn next_id(&mut self) -> RegistryResult<EmployeeId> {
        let employees = &self.employees;
        self.id_policy
            .generate(&mut self.rng, |candidate| {
                employees.iter().any(|employee| employee.id == candidate)
            })
            .ok_or_else(|| {
                warn!(
                    "event=employee_add module=service status=error error_code=id_exhausted attempts={}",
                    self.id_policy.max_attempts()
                );
                RegistryError::IdExhausted {
                    attempts: self.id_policy.max_attempts(),
                }
            })
    }

    fn commit(
        &mut self,
        action: &'static str,
        next: Vec<Employee>,
        event: RegistryEvent,
    ) -> RegistryResult<()> {
        if let Err(err) = self.repo.save_all(&next) {
            warn!(
                "event=employee_{action} module=service status=error error_code=persist_failed"
            );
            return Err(err.into());
        }

        self.employees = next;
        self.revision += 1;
        let id = match &event {
            RegistryEvent::Added(employee) | RegistryEvent::Updated(employee) => {
                employee.id.as_str()
            }
            RegistryEvent::Deleted(id) => id.as_str(),
        };
        info!(
            "event=employee_{action} module=service status=ok id={id} count={} revision={}",
            self.employees.len(),
            self.revision
        );
        self.events.push(event);
        Ok(())
    }
}
