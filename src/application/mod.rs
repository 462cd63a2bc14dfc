//! Application layer: the org tree manager and chart loading
//!
//! This layer orchestrates domain logic; chart files are its only I/O.

pub mod error;
pub mod error_ext;
pub mod history;
pub mod loader;
pub mod manager;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use history::{History, HistoryEntry, RedoEntry};
pub use loader::{load_chart, parse_chart, ChartFile};
pub use manager::{MoveOutcome, OrgTreeManager, Outcome, UndoOutcome};
