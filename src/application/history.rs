//! Undo/redo history for chart moves
//!
//! Both stacks are strictly LIFO. Only the entry on top of the undo stack can
//! be inverted, because undo relies on the exact shape of what its move left
//! behind in the two supervisors' subordinate lists.

use generational_arena::Index;

use crate::domain::EmployeeId;

/// Record of one committed move, sufficient to invert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Supervisor the employee was taken from
    pub old_supervisor: Index,
    /// Supervisor the employee was placed under
    pub new_supervisor: Index,
    /// The moved employee
    pub employee: Index,
    /// Slot the employee occupied in the old supervisor's list
    pub position: usize,
    /// Copy of the employee's subordinate list taken before the move
    pub subordinates: Vec<Index>,
    pub employee_id: EmployeeId,
    pub supervisor_id: EmployeeId,
}

/// Arguments needed to replay an undone move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedoEntry {
    pub employee_id: EmployeeId,
    pub supervisor_id: EmployeeId,
}

impl From<&HistoryEntry> for RedoEntry {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            employee_id: entry.employee_id,
            supervisor_id: entry.supervisor_id,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<RedoEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh move. Any pending redo is invalidated.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
    }

    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop()
    }

    pub fn push_redo(&mut self, entry: RedoEntry) {
        self.redo_stack.push(entry);
    }

    pub fn pop_redo(&mut self) -> Option<RedoEntry> {
        self.redo_stack.pop()
    }

    pub fn peek_undo(&self) -> Option<&HistoryEntry> {
        self.undo_stack.last()
    }

    pub fn peek_redo(&self) -> Option<&RedoEntry> {
        self.redo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
