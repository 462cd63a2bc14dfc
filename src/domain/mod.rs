//! Domain layer: employees, the arena-backed chart and its errors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod employee;
pub mod error;
pub mod operation;

pub use arena::{EmployeeNode, OrgArena, TreeIterator};
pub use builder::ChartBuilder;
pub use employee::{Employee, EmployeeId, EmployeeRecord};
pub use error::{DomainError, DomainResult, ErrorKind};
pub use operation::Operation;
