//! Table projection helpers for the employee listing.
//!
//! # Responsibility
//! - Filter by free-text search, position and department.
//! - Order by salary (highest first) and paginate.
//! - Format salaries for display.
//!
//! # Invariants
//! - Queries never mutate the source collection.
//! - Equal salaries keep insertion order.
//! - Limit defaults to 10 and clamps to 100.

use crate::model::employee::{Department, Employee, Position};

const LIST_DEFAULT_LIMIT: u32 = 10;
const LIST_LIMIT_MAX: u32 = 100;
const CURRENCY_SUFFIX: &str = "VNĐ";

/// Query options for the employee table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeListQuery {
    /// Case-insensitive substring match against id or name.
    pub search: Option<String>,
    pub position: Option<Position>,
    pub department: Option<Department>,
    /// Page size. Defaults to 10 and clamps to 100.
    pub limit: Option<u32>,
    /// Number of matching rows to skip.
    pub offset: u32,
}

/// One page of the employee table.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeListResult {
    pub items: Vec<Employee>,
    /// Number of rows matching the filters before pagination.
    pub total: usize,
    pub applied_limit: u32,
}

/// Normalizes a requested page size.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => LIST_DEFAULT_LIMIT,
        Some(value) => value.min(LIST_LIMIT_MAX),
    }
}

impl EmployeeListQuery {
    /// Returns whether `employee` passes every configured filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        let search_ok = match normalized_search(self.search.as_deref()) {
            Some(needle) => {
                employee.id.to_lowercase().contains(&needle)
                    || employee.name.to_lowercase().contains(&needle)
            }
            None => true,
        };

        search_ok
            && self.position.map_or(true, |value| employee.position == value)
            && self
                .department
                .map_or(true, |value| employee.department == value)
    }

    /// Applies filters, salary ordering and pagination to `employees`.
    pub fn apply(&self, employees: &[Employee]) -> EmployeeListResult {
        let applied_limit = normalize_list_limit(self.limit);

        let mut matching: Vec<&Employee> = employees
            .iter()
            .filter(|employee| self.matches(employee))
            .collect();
        matching.sort_by(|left, right| right.salary.total_cmp(&left.salary));

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(self.offset as usize)
            .take(applied_limit as usize)
            .cloned()
            .collect();

        EmployeeListResult {
            items,
            total,
            applied_limit,
        }
    }
}

fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

/// Formats a salary as whole đồng with `.` thousands separators,
/// e.g. `5000000.0` -> `5.000.000 VNĐ`.
pub fn format_salary(salary: f64) -> String {
    let rounded = salary.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{grouped} {CURRENCY_SUFFIX}")
}
