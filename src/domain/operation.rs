//! Chart operations as parsed from scripts and the command line

use std::fmt;
use std::str::FromStr;

use crate::domain::employee::EmployeeId;
use crate::domain::error::DomainError;

/// One manager call: a move, an undo or a redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Move {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
    Undo,
    Redo,
}

impl FromStr for Operation {
    type Err = DomainError;

    /// Accepts `move:<employee>:<supervisor>`, `undo` and `redo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidOperation(s.to_string());
        let mut parts = s.trim().split(':');
        let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();

        let op = match keyword.as_str() {
            "undo" => Operation::Undo,
            "redo" => Operation::Redo,
            "move" => {
                let employee = parts.next().and_then(|p| p.trim().parse().ok());
                let supervisor = parts.next().and_then(|p| p.trim().parse().ok());
                match (employee, supervisor) {
                    (Some(employee), Some(supervisor)) => Operation::Move {
                        employee,
                        supervisor,
                    },
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Move {
                employee,
                supervisor,
            } => write!(f, "move:{}:{}", employee, supervisor),
            Operation::Undo => write!(f, "undo"),
            Operation::Redo => write!(f, "redo"),
        }
    }
}
