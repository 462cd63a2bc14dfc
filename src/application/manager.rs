//! OrgTree manager: reparents employees and keeps undo/redo history.

use generational_arena::Index;
use tracing::{debug, info, instrument, warn};

use crate::application::history::{History, HistoryEntry, RedoEntry};
use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeId, EmployeeNode, Operation, OrgArena,
};

/// Result of a committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub employee: EmployeeId,
    pub old_supervisor: EmployeeId,
    pub new_supervisor: EmployeeId,
    /// Former subordinates of the employee, now reporting to `old_supervisor`
    pub promoted: Vec<EmployeeId>,
}

/// Result of an undone move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoOutcome {
    pub employee: EmployeeId,
    /// Supervisor the employee is back under
    pub restored_supervisor: EmployeeId,
    /// Supervisor the employee was removed from
    pub released_supervisor: EmployeeId,
    pub restored_subordinates: usize,
}

/// Result of [`OrgTreeManager::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Moved(MoveOutcome),
    Undone(UndoOutcome),
    Redone(MoveOutcome),
}

/// Lookups resolved for a move, before anything is mutated.
struct MovePlan {
    employee: Index,
    new_supervisor: Index,
    old_supervisor: Index,
}

/// Owns an org chart and the history of moves applied to it.
#[derive(Debug, Clone)]
pub struct OrgTreeManager {
    chart: OrgArena,
    history: History,
}

impl OrgTreeManager {
    pub fn new(chart: OrgArena) -> Self {
        Self {
            chart,
            history: History::new(),
        }
    }

    pub fn from_employee(root: &Employee) -> DomainResult<Self> {
        Ok(Self::new(OrgArena::from_employee(root)?))
    }

    pub fn chart(&self) -> &OrgArena {
        &self.chart
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn root(&self) -> Option<&EmployeeNode> {
        self.chart.root().and_then(|root| self.chart.get_node(root))
    }

    /// Owned snapshot of the current chart.
    pub fn to_employee(&self) -> Option<Employee> {
        self.chart.to_employee()
    }

    fn locate(&self, id: EmployeeId) -> Option<Index> {
        self.chart
            .root()
            .and_then(|root| self.chart.find_node(id, root))
    }

    pub fn name_of(&self, id: EmployeeId) -> Option<&str> {
        self.locate(id)
            .and_then(|idx| self.chart.get_node(idx))
            .map(|node| node.name.as_str())
    }

    pub fn subordinate_ids(&self, id: EmployeeId) -> Option<Vec<EmployeeId>> {
        self.locate(id).map(|idx| self.chart.subordinate_ids(idx))
    }

    pub fn supervisor_of(&self, id: EmployeeId) -> Option<EmployeeId> {
        let root = self.chart.root()?;
        self.chart
            .find_parent(id, root)
            .and_then(|idx| self.chart.get_node(idx))
            .map(|node| node.id)
    }

    fn id_of(&self, idx: Index) -> EmployeeId {
        self.chart.get_node(idx).map(|node| node.id).unwrap_or_default()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Run one parsed operation.
    pub fn apply(&mut self, op: Operation) -> DomainResult<Outcome> {
        match op {
            Operation::Move {
                employee,
                supervisor,
            } => self.move_employee(employee, supervisor).map(Outcome::Moved),
            Operation::Undo => self.undo().map(Outcome::Undone),
            Operation::Redo => self.redo().map(Outcome::Redone),
        }
    }

    fn plan_move(&self, employee_id: EmployeeId, supervisor_id: EmployeeId) -> DomainResult<MovePlan> {
        let root = self
            .chart
            .root()
            .ok_or(DomainError::EmployeeNotFound(employee_id))?;

        let employee = self
            .chart
            .find_node(employee_id, root)
            .ok_or(DomainError::EmployeeNotFound(employee_id))?;
        let new_supervisor = self
            .chart
            .find_node(supervisor_id, root)
            .ok_or(DomainError::SupervisorNotFound(supervisor_id))?;
        let old_supervisor = self
            .chart
            .find_parent(employee_id, root)
            .ok_or(DomainError::NoCurrentSupervisor(employee_id))?;

        if employee_id == supervisor_id {
            return Err(DomainError::SelfSupervision(employee_id));
        }
        if self.chart.find_node(supervisor_id, employee).is_some() {
            return Err(DomainError::SupervisorIsSubordinate {
                employee: employee_id,
                supervisor: supervisor_id,
            });
        }

        Ok(MovePlan {
            employee,
            new_supervisor,
            old_supervisor,
        })
    }

    /// Move an employee under a new supervisor.
    ///
    /// The employee's own subordinates are handed to the old supervisor
    /// (appended in order) and the employee arrives at the new supervisor
    /// without subordinates. On success the redo history is discarded.
    /// Rejected moves change neither the chart nor the history.
    #[instrument(level = "debug", skip(self))]
    pub fn move_employee(
        &mut self,
        employee_id: EmployeeId,
        supervisor_id: EmployeeId,
    ) -> DomainResult<MoveOutcome> {
        let plan = self.plan_move(employee_id, supervisor_id).map_err(|e| {
            warn!("move rejected: {}", e);
            e
        })?;

        let subordinates = self
            .chart
            .get_node_mut(plan.employee)
            .map(|node| std::mem::take(&mut node.subordinates))
            .unwrap_or_default();

        let mut position = 0;
        if let Some(old) = self.chart.get_node_mut(plan.old_supervisor) {
            if let Some(pos) = old.subordinates.iter().position(|&c| c == plan.employee) {
                old.subordinates.remove(pos);
                position = pos;
            }
            old.subordinates.extend(subordinates.iter().copied());
        }
        if let Some(new) = self.chart.get_node_mut(plan.new_supervisor) {
            new.subordinates.push(plan.employee);
        }

        let outcome = MoveOutcome {
            employee: employee_id,
            old_supervisor: self.id_of(plan.old_supervisor),
            new_supervisor: supervisor_id,
            promoted: subordinates.iter().map(|&idx| self.id_of(idx)).collect(),
        };

        self.history.record(HistoryEntry {
            old_supervisor: plan.old_supervisor,
            new_supervisor: plan.new_supervisor,
            employee: plan.employee,
            position,
            subordinates,
            employee_id,
            supervisor_id,
        });

        info!(
            "moved {} from {} to {} ({} promoted)",
            employee_id,
            outcome.old_supervisor,
            supervisor_id,
            outcome.promoted.len()
        );
        Ok(outcome)
    }

    /// Invert the most recent move.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> DomainResult<UndoOutcome> {
        let Some(entry) = self.history.pop_undo() else {
            warn!("{}", DomainError::NothingToUndo);
            return Err(DomainError::NothingToUndo);
        };
        debug!("undo: {:?}", entry);

        // Drop the placement appended to the new supervisor first, so a move
        // under the same supervisor unwinds in the right order.
        if let Some(new) = self.chart.get_node_mut(entry.new_supervisor) {
            let placed = new.subordinates.pop();
            debug_assert_eq!(placed, Some(entry.employee));
        }

        if let Some(old) = self.chart.get_node_mut(entry.old_supervisor) {
            let keep = old.subordinates.len().saturating_sub(entry.subordinates.len());
            old.subordinates.truncate(keep);
            let position = entry.position.min(old.subordinates.len());
            old.subordinates.insert(position, entry.employee);
        }

        if let Some(employee) = self.chart.get_node_mut(entry.employee) {
            employee.subordinates = entry.subordinates.clone();
        }

        self.history.push_redo(RedoEntry::from(&entry));

        let outcome = UndoOutcome {
            employee: entry.employee_id,
            restored_supervisor: self.id_of(entry.old_supervisor),
            released_supervisor: entry.supervisor_id,
            restored_subordinates: entry.subordinates.len(),
        };
        info!(
            "undid move of {} (back under {})",
            outcome.employee, outcome.restored_supervisor
        );
        Ok(outcome)
    }

    /// Replay the most recently undone move against the current chart.
    ///
    /// The replay is an ordinary move, so it discards whatever else is on
    /// the redo stack.
    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> DomainResult<MoveOutcome> {
        let Some(entry) = self.history.pop_redo() else {
            warn!("{}", DomainError::NothingToRedo);
            return Err(DomainError::NothingToRedo);
        };

        let result = self.move_employee(entry.employee_id, entry.supervisor_id);
        if result.is_err() {
            self.history.push_redo(entry);
        }
        result
    }
}
