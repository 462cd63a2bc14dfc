//! Domain entities: employees in owned and flat form

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique, immutable employee identity.
pub type EmployeeId = u32;

/// Owned, nested form of an organization (sub)tree.
///
/// Used to seed an [`OrgArena`](crate::domain::OrgArena) and to take
/// structural snapshots of it. Two values compare equal when ids, names and
/// child order match at every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub subordinates: Vec<Employee>,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subordinates: Vec::new(),
        }
    }

    pub fn with_subordinates(mut self, subordinates: impl IntoIterator<Item = Employee>) -> Self {
        self.subordinates.extend(subordinates);
        self
    }

    /// Number of employees in this subtree, including self.
    pub fn headcount(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(current.subordinates.iter());
        }
        count
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Flat chart-file record: one employee and the id of their supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub name: String,
    /// `None` marks the root of the chart
    #[serde(default)]
    pub supervisor: Option<EmployeeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_employees_when_counting_then_includes_all_levels() {
        let chart = Employee::new(1, "root").with_subordinates([
            Employee::new(2, "a").with_subordinates([Employee::new(4, "c")]),
            Employee::new(3, "b"),
        ]);
        assert_eq!(chart.headcount(), 4);
    }

    #[test]
    fn given_employee_when_displayed_then_shows_name() {
        assert_eq!(Employee::new(7, "Harry Tobs").to_string(), "Harry Tobs");
    }
}
