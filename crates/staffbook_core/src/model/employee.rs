//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record and its id-less draft form.
//! - Own the closed enumerations and their persisted literal strings.
//!
//! # Invariants
//! - `id` is assigned by the registry and never supplied by callers.
//! - Enum wire strings are a compatibility contract with previously
//!   persisted data and must not change.
//! - `salary` is finite and non-negative once validated.

use crate::model::validation::{validate_draft, validate_stored, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Stable identifier of one employee record, e.g. `NV04718263`.
pub type EmployeeId = String;

/// Job position. Serialized with the display strings used by stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Thực tập sinh")]
    Intern,
    #[serde(rename = "Nhân viên")]
    Staff,
    #[serde(rename = "Chuyên viên cao cấp")]
    Senior,
    #[serde(rename = "Trưởng nhóm")]
    Leader,
    #[serde(rename = "Quản lý")]
    Manager,
    #[serde(rename = "Giám đốc")]
    Director,
}

impl Position {
    /// All positions in declaration order, for select inputs.
    pub const ALL: [Position; 6] = [
        Self::Intern,
        Self::Staff,
        Self::Senior,
        Self::Leader,
        Self::Manager,
        Self::Director,
    ];

    /// Persisted/display literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intern => "Thực tập sinh",
            Self::Staff => "Nhân viên",
            Self::Senior => "Chuyên viên cao cấp",
            Self::Leader => "Trưởng nhóm",
            Self::Manager => "Quản lý",
            Self::Director => "Giám đốc",
        }
    }
}

/// Owning department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Công nghệ thông tin")]
    It,
    #[serde(rename = "Nhân sự")]
    Hr,
    #[serde(rename = "Tài chính")]
    Finance,
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Kinh doanh")]
    Sales,
    #[serde(rename = "Vận hành")]
    Operations,
}

impl Department {
    /// All departments in declaration order, for select inputs.
    pub const ALL: [Department; 6] = [
        Self::It,
        Self::Hr,
        Self::Finance,
        Self::Marketing,
        Self::Sales,
        Self::Operations,
    ];

    /// Persisted/display literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::It => "Công nghệ thông tin",
            Self::Hr => "Nhân sự",
            Self::Finance => "Tài chính",
            Self::Marketing => "Marketing",
            Self::Sales => "Kinh doanh",
            Self::Operations => "Vận hành",
        }
    }
}

/// Employment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Trial period.
    #[serde(rename = "Thử việc")]
    Probation,
    #[serde(rename = "Đang làm việc")]
    Active,
    #[serde(rename = "Nghỉ phép")]
    OnLeave,
    /// No longer employed.
    #[serde(rename = "Đã thôi việc")]
    Resigned,
}

impl EmployeeStatus {
    /// All statuses in declaration order, for select inputs.
    pub const ALL: [EmployeeStatus; 4] = [
        Self::Probation,
        Self::Active,
        Self::OnLeave,
        Self::Resigned,
    ];

    /// Persisted/display literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Probation => "Thử việc",
            Self::Active => "Đang làm việc",
            Self::OnLeave => "Nghỉ phép",
            Self::Resigned => "Đã thôi việc",
        }
    }

    /// Returns whether a record in this state may be removed.
    ///
    /// Only trial-period and resigned employees can be deleted; active and
    /// on-leave records must be moved to `Resigned` first.
    pub fn is_deletable(self) -> bool {
        matches!(self, Self::Probation | Self::Resigned)
    }
}

/// Employee field set submitted by create/update actions (no `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub position: Position,
    pub department: Department,
    pub salary: f64,
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    /// Runs field-level validation and folds violations into one error.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = validate_draft(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(violations))
        }
    }

    /// Attaches an id, producing a full record.
    pub fn into_employee(self, id: impl Into<EmployeeId>) -> Employee {
        Employee {
            id: id.into(),
            name: self.name,
            position: self.position,
            department: self.department,
            salary: self.salary,
            status: self.status,
        }
    }
}

/// Canonical employee record, also the persisted JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub position: Position,
    pub department: Department,
    pub salary: f64,
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns every field except `id`.
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            position: self.position,
            department: self.department,
            salary: self.salary,
            status: self.status,
        }
    }

    /// Replaces all fields except `id`.
    pub fn apply(&mut self, draft: EmployeeDraft) {
        self.name = draft.name;
        self.position = draft.position;
        self.department = draft.department;
        self.salary = draft.salary;
        self.status = draft.status;
    }

    /// Checks the invariants every stored record must hold: a non-blank id
    /// and a finite, non-negative salary.
    ///
    /// Unlike `EmployeeDraft::validate`, the name is not checked against
    /// the input rules.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = validate_stored(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Department, EmployeeStatus, Position};

    #[test]
    fn as_str_matches_serde_literal() {
        for position in Position::ALL {
            let json = serde_json::to_value(position).unwrap();
            assert_eq!(json, position.as_str());
        }
        for department in Department::ALL {
            let json = serde_json::to_value(department).unwrap();
            assert_eq!(json, department.as_str());
        }
        for status in EmployeeStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }

    #[test]
    fn only_probation_and_resigned_are_deletable() {
        let deletable: Vec<_> = EmployeeStatus::ALL
            .into_iter()
            .filter(|status| status.is_deletable())
            .collect();
        assert_eq!(
            deletable,
            vec![EmployeeStatus::Probation, EmployeeStatus::Resigned]
        );
    }
}
