//! Field-level validation for employee drafts.
//!
//! # Responsibility
//! - Check a draft without any rendering concern and report every
//!   violation at once, so callers can annotate each form field.
//!
//! # Invariants
//! - Validation is pure: no I/O, no logging.
//! - An empty violation list means the draft is acceptable for persistence.

use crate::model::employee::{Employee, EmployeeDraft};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted name length in characters.
pub const NAME_MAX_CHARS: usize = 50;

// Letters of any script (accented Latin included), combining marks, decimal
// digits and whitespace.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\p{Nd}\s]+$").expect("valid name regex"));

/// Field addressed by a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Id,
    Name,
    Position,
    Department,
    Salary,
    Status,
}

impl EmployeeField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Position => "position",
            Self::Department => "department",
            Self::Salary => "salary",
            Self::Status => "status",
        }
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Missing, empty or whitespace-only.
    Required,
    TooLong { max: usize },
    InvalidCharacters,
    Negative,
    NotFinite,
}

/// One field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: EmployeeField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: EmployeeField, kind: ViolationKind) -> Self {
        Self { field, kind }
    }

    pub fn required(field: EmployeeField) -> Self {
        Self::new(field, ViolationKind::Required)
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = self.field.as_str();
        match self.kind {
            ViolationKind::Required => write!(f, "{field} is required"),
            ViolationKind::TooLong { max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            ViolationKind::InvalidCharacters => write!(
                f,
                "{field} may only contain letters, digits and spaces"
            ),
            ViolationKind::Negative => write!(f, "{field} must not be negative"),
            ViolationKind::NotFinite => write!(f, "{field} must be a finite number"),
        }
    }
}

/// Non-empty set of violations returned by `validate()` helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether any violation targets `field`.
    pub fn has(&self, field: EmployeeField) -> bool {
        self.violations.iter().any(|item| item.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid employee: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Validates every field of `draft` and returns all violations found.
///
/// Enumerated fields are closed by their Rust types, so only `name` and
/// `salary` can fail here.
pub fn validate_draft(draft: &EmployeeDraft) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if let Some(kind) = check_name(&draft.name) {
        violations.push(FieldViolation::new(EmployeeField::Name, kind));
    }
    if let Some(kind) = check_salary(draft.salary) {
        violations.push(FieldViolation::new(EmployeeField::Salary, kind));
    }

    violations
}

/// Validates the structural invariants of a stored record.
///
/// Name content rules are input rules for drafts only: records written by
/// earlier versions may carry names the form would now refuse, and those
/// must still load.
pub fn validate_stored(employee: &Employee) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if employee.id.trim().is_empty() {
        violations.push(FieldViolation::required(EmployeeField::Id));
    }
    if let Some(kind) = check_salary(employee.salary) {
        violations.push(FieldViolation::new(EmployeeField::Salary, kind));
    }

    violations
}

fn check_name(name: &str) -> Option<ViolationKind> {
    if name.trim().is_empty() {
        return Some(ViolationKind::Required);
    }
    // Surrounding whitespace is kept verbatim but not counted.
    if name.trim().chars().count() > NAME_MAX_CHARS {
        return Some(ViolationKind::TooLong {
            max: NAME_MAX_CHARS,
        });
    }
    if !NAME_RE.is_match(name) {
        return Some(ViolationKind::InvalidCharacters);
    }
    None
}

fn check_salary(salary: f64) -> Option<ViolationKind> {
    if !salary.is_finite() {
        return Some(ViolationKind::NotFinite);
    }
    if salary < 0.0 {
        return Some(ViolationKind::Negative);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{check_name, check_salary, ViolationKind, NAME_MAX_CHARS};

    #[test]
    fn check_name_accepts_vietnamese_and_digits() {
        assert_eq!(check_name("Nguyễn Văn An"), None);
        assert_eq!(check_name("Trần Thị Bích 2"), None);
    }

    #[test]
    fn check_name_rejects_blank_and_symbols() {
        assert_eq!(check_name(""), Some(ViolationKind::Required));
        assert_eq!(check_name("  \t "), Some(ViolationKind::Required));
        assert_eq!(
            check_name("Robert'); DROP"),
            Some(ViolationKind::InvalidCharacters)
        );
    }

    #[test]
    fn check_name_counts_trimmed_characters_not_bytes() {
        let at_limit = "Đ".repeat(NAME_MAX_CHARS);
        assert_eq!(check_name(&at_limit), None);

        let padded = format!("  {at_limit}\t ");
        assert_eq!(check_name(&padded), None);

        let over = "a".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(
            check_name(&over),
            Some(ViolationKind::TooLong {
                max: NAME_MAX_CHARS
            })
        );
    }

    #[test]
    fn check_salary_rejects_negative_and_nan() {
        assert_eq!(check_salary(0.0), None);
        assert_eq!(check_salary(-1.0), Some(ViolationKind::Negative));
        assert_eq!(check_salary(f64::NAN), Some(ViolationKind::NotFinite));
        assert_eq!(check_salary(f64::INFINITY), Some(ViolationKind::NotFinite));
    }
}
