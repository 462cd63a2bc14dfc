//! Chart builder: turns flat employee records into an org tree.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::OrgArena;
use crate::domain::employee::{EmployeeId, EmployeeRecord};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a single rooted tree from [`EmployeeRecord`]s.
///
/// Children keep the order in which their records appear.
#[derive(Debug, Default)]
pub struct ChartBuilder {
    relationship_cache: HashMap<EmployeeId, Vec<EmployeeId>>,
    names: HashMap<EmployeeId, String>,
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, records))]
    pub fn build(&mut self, records: &[EmployeeRecord]) -> DomainResult<OrgArena> {
        // Reset state for a fresh build
        self.relationship_cache.clear();
        self.names.clear();

        let root = self.index_records(records)?;
        self.check_supervisors(records)?;

        let tree = self.build_tree(root);

        if tree.len() != records.len() {
            let reached: HashSet<EmployeeId> = tree.iter().map(|(_, node)| node.id).collect();
            let unreachable = records
                .iter()
                .map(|r| r.id)
                .filter(|id| !reached.contains(id))
                .sorted()
                .collect();
            return Err(DomainError::Unreachable(unreachable));
        }

        debug!("built chart with {} employees", tree.len());
        Ok(tree)
    }

    /// Record names and supervisor links; returns the single root id.
    fn index_records(&mut self, records: &[EmployeeRecord]) -> DomainResult<EmployeeId> {
        let mut roots = Vec::new();

        for record in records {
            if self.names.insert(record.id, record.name.clone()).is_some() {
                return Err(DomainError::DuplicateId(record.id));
            }
            match record.supervisor {
                Some(supervisor) => self
                    .relationship_cache
                    .entry(supervisor)
                    .or_default()
                    .push(record.id),
                None => roots.push(record.id),
            }
        }

        match roots.as_slice() {
            [] => Err(DomainError::NoRoot),
            [root] => Ok(*root),
            _ => Err(DomainError::MultipleRoots(roots)),
        }
    }

    fn check_supervisors(&self, records: &[EmployeeRecord]) -> DomainResult<()> {
        for record in records {
            if let Some(supervisor) = record.supervisor {
                if !self.names.contains_key(&supervisor) {
                    return Err(DomainError::UnknownSupervisor {
                        employee: record.id,
                        supervisor,
                    });
                }
            }
        }
        Ok(())
    }

    fn build_tree(&self, root: EmployeeId) -> OrgArena {
        let mut tree = OrgArena::new();
        let mut stack = vec![(root, None)];

        // Records whose supervisor chain loops never hang off the root, so
        // they are simply not reached here.
        while let Some((current, parent_idx)) = stack.pop() {
            let name = self.names.get(&current).cloned().unwrap_or_default();
            let current_idx = tree.insert_node(current, name, parent_idx);

            if let Some(children) = self.relationship_cache.get(&current) {
                for &child in children.iter().rev() {
                    stack.push((child, Some(current_idx)));
                }
            }
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: EmployeeId, name: &str, supervisor: Option<EmployeeId>) -> EmployeeRecord {
        EmployeeRecord {
            id,
            name: name.to_string(),
            supervisor,
        }
    }

    #[test]
    fn given_valid_records_when_building_then_preserves_record_order() {
        let records = vec![
            record(1, "root", None),
            record(3, "b", Some(1)),
            record(2, "a", Some(1)),
            record(4, "c", Some(2)),
        ];
        let tree = ChartBuilder::new().build(&records).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree.subordinate_ids(root), vec![3, 2]);
        let a = tree.find_node(2, root).unwrap();
        assert_eq!(tree.subordinate_ids(a), vec![4]);
    }

    #[test]
    fn given_supervisor_listed_after_subordinate_when_building_then_succeeds() {
        let records = vec![record(2, "a", Some(1)), record(1, "root", None)];
        let tree = ChartBuilder::new().build(&records).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn given_cycle_detached_from_root_when_building_then_unreachable() {
        let records = vec![
            record(1, "root", None),
            record(2, "a", Some(3)),
            record(3, "b", Some(2)),
        ];
        let err = ChartBuilder::new().build(&records).unwrap_err();
        assert_eq!(err, DomainError::Unreachable(vec![2, 3]));
    }

    #[test]
    fn given_no_records_when_building_then_no_root() {
        assert_eq!(
            ChartBuilder::new().build(&[]).unwrap_err(),
            DomainError::NoRoot
        );
    }
}
