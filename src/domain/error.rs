//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::employee::EmployeeId;

/// Coarse classification of a [`DomainError`].
///
/// Lets callers branch on the failure class without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An id could not be resolved, or the move would break the tree.
    LookupFailure,
    /// Undo or redo with an empty history stack.
    EmptyHistory,
    /// A chart description does not form a single rooted tree.
    InvalidChart,
    /// A script token could not be parsed into an operation.
    InvalidOperation,
}

/// Domain errors represent business rule violations.
/// None of them leaves the tree or the history in a modified state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("supervisor not found: {0}")]
    SupervisorNotFound(EmployeeId),

    #[error("employee {0} has no supervisor (root of the chart)")]
    NoCurrentSupervisor(EmployeeId),

    #[error("employee {0} cannot supervise themselves")]
    SelfSupervision(EmployeeId),

    #[error("supervisor {supervisor} reports to employee {employee}")]
    SupervisorIsSubordinate {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("chart has no root employee")]
    NoRoot,

    #[error("chart has more than one root employee: {0:?}")]
    MultipleRoots(Vec<EmployeeId>),

    #[error("duplicate employee id: {0}")]
    DuplicateId(EmployeeId),

    #[error("employee {employee} references unknown supervisor {supervisor}")]
    UnknownSupervisor {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },

    #[error("employees not reachable from the root: {0:?}")]
    Unreachable(Vec<EmployeeId>),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::EmployeeNotFound(_)
            | DomainError::SupervisorNotFound(_)
            | DomainError::NoCurrentSupervisor(_)
            | DomainError::SelfSupervision(_)
            | DomainError::SupervisorIsSubordinate { .. } => ErrorKind::LookupFailure,
            DomainError::NothingToUndo | DomainError::NothingToRedo => ErrorKind::EmptyHistory,
            DomainError::NoRoot
            | DomainError::MultipleRoots(_)
            | DomainError::DuplicateId(_)
            | DomainError::UnknownSupervisor { .. }
            | DomainError::Unreachable(_) => ErrorKind::InvalidChart,
            DomainError::InvalidOperation(_) => ErrorKind::InvalidOperation,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
