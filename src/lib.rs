//! orgchart: an in-memory organization chart with reversible moves.
//!
//! [`application::OrgTreeManager`] owns the chart and the undo/redo history;
//! everything else loads charts, configures and presents it.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use application::{OrgTreeManager, Outcome};
pub use domain::{DomainError, Employee, EmployeeId, ErrorKind, Operation, OrgArena};
