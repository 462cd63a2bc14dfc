use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based org chart.
#[derive(Debug, Clone)]
pub struct EmployeeNode {
    /// Identity, fixed at construction
    pub id: EmployeeId,
    /// Display name
    pub name: String,
    /// Indices of direct reports in the arena, most recently appended last
    pub subordinates: Vec<Index>,
}

impl fmt::Display for EmployeeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based tree holding one organization chart.
///
/// Node identity is the arena [`Index`]; it stays stable while a node is
/// reparented, which lets history records point at supervisors directly.
#[derive(Debug, Clone)]
pub struct OrgArena {
    /// Arena storage for all nodes
    arena: Arena<EmployeeNode>,
    /// Index of the root (top of the chart), None for empty charts
    root: Option<Index>,
}

impl Default for OrgArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build an arena from an owned nested chart.
    ///
    /// Child order is preserved at every level. Fails on duplicate ids.
    pub fn from_employee(root: &Employee) -> DomainResult<Self> {
        let mut tree = Self::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(&Employee, Option<Index>)> = vec![(root, None)];

        while let Some((employee, parent)) = stack.pop() {
            if !seen.insert(employee.id) {
                return Err(DomainError::DuplicateId(employee.id));
            }
            let idx = tree.insert_node(employee.id, employee.name.clone(), parent);
            // Reverse so children are popped, and appended, left-to-right
            for child in employee.subordinates.iter().rev() {
                stack.push((child, Some(idx)));
            }
        }

        Ok(tree)
    }

    #[instrument(level = "trace", skip(self, name))]
    pub fn insert_node(
        &mut self,
        id: EmployeeId,
        name: impl Into<String>,
        parent: Option<Index>,
    ) -> Index {
        let node = EmployeeNode {
            id,
            name: name.into(),
            subordinates: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.subordinates.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&EmployeeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut EmployeeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order, left-to-right traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order, left-to-right traversal of the subtree at `start`.
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(start))
    }

    /// Depth-first search of `subtree_root` and its descendants for `id`.
    ///
    /// Pre-order, so the first match in traversal order wins.
    #[instrument(level = "trace", skip(self))]
    pub fn find_node(&self, id: EmployeeId, subtree_root: Index) -> Option<Index> {
        self.iter_from(subtree_root)
            .find(|(_, node)| node.id == id)
            .map(|(idx, _)| idx)
    }

    /// Depth-first search for the node whose direct subordinate has `id`.
    ///
    /// None when `id` names `subtree_root` itself or is absent.
    #[instrument(level = "trace", skip(self))]
    pub fn find_parent(&self, id: EmployeeId, subtree_root: Index) -> Option<Index> {
        self.iter_from(subtree_root)
            .find(|(_, node)| {
                node.subordinates
                    .iter()
                    .filter_map(|&child| self.get_node(child))
                    .any(|child| child.id == id)
            })
            .map(|(idx, _)| idx)
    }

    /// Ids of the direct subordinates of `idx`, in order.
    pub fn subordinate_ids(&self, idx: Index) -> Vec<EmployeeId> {
        self.get_node(idx)
            .map(|node| {
                node.subordinates
                    .iter()
                    .filter_map(|&child| self.get_node(child))
                    .map(|child| child.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of levels in the chart; 0 for an empty chart.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                for &child in &node.subordinates {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Owned, nested snapshot of the subtree at `idx`.
    pub fn to_employee_at(&self, idx: Index) -> Option<Employee> {
        let node = self.get_node(idx)?;
        let subordinates = node
            .subordinates
            .iter()
            .filter_map(|&child| self.to_employee_at(child))
            .collect();
        Some(Employee {
            id: node.id,
            name: node.name.clone(),
            subordinates,
        })
    }

    /// Owned, nested snapshot of the whole chart.
    pub fn to_employee(&self) -> Option<Employee> {
        self.root.and_then(|root| self.to_employee_at(root))
    }
}

pub struct TreeIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a OrgArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a EmployeeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.subordinates.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      1
    //     / \
    //    2   3
    //    |
    //    4
    fn small_chart() -> Employee {
        Employee::new(1, "root").with_subordinates([
            Employee::new(2, "a").with_subordinates([Employee::new(4, "c")]),
            Employee::new(3, "b"),
        ])
    }

    #[test]
    fn given_nested_chart_when_round_tripping_then_structure_is_preserved() {
        let chart = small_chart();
        let tree = OrgArena::from_employee(&chart).unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.to_employee(), Some(chart));
    }

    #[test]
    fn given_duplicate_ids_when_building_then_fails() {
        let chart = Employee::new(1, "root")
            .with_subordinates([Employee::new(2, "a"), Employee::new(2, "again")]);
        assert_eq!(
            OrgArena::from_employee(&chart).unwrap_err(),
            DomainError::DuplicateId(2)
        );
    }

    #[test]
    fn given_chart_when_iterating_then_visits_in_pre_order() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        let ids: Vec<_> = tree.iter().map(|(_, node)| node.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 3]);
    }

    #[test]
    fn given_chart_when_finding_nodes_then_resolves_ids() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        let root = tree.root().unwrap();

        let found = tree.find_node(4, root).unwrap();
        assert_eq!(tree.get_node(found).unwrap().name, "c");
        assert_eq!(tree.find_node(1, root), Some(root));
        assert_eq!(tree.find_node(99, root), None);
    }

    #[test]
    fn given_subtree_when_finding_node_then_search_is_limited_to_subtree() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        let root = tree.root().unwrap();
        let b = tree.find_node(3, root).unwrap();
        assert_eq!(tree.find_node(4, b), None);
    }

    #[test]
    fn given_chart_when_finding_parent_then_returns_direct_supervisor() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        let root = tree.root().unwrap();

        let parent = tree.find_parent(4, root).unwrap();
        assert_eq!(tree.get_node(parent).unwrap().id, 2);
        assert_eq!(tree.find_parent(3, root), Some(root));
    }

    #[test]
    fn given_root_or_unknown_id_when_finding_parent_then_none() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.find_parent(1, root), None);
        assert_eq!(tree.find_parent(99, root), None);
    }

    #[test]
    fn given_chart_when_measuring_then_reports_depth_and_subordinates() {
        let tree = OrgArena::from_employee(&small_chart()).unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.subordinate_ids(tree.root().unwrap()), vec![2, 3]);
        assert_eq!(OrgArena::new().depth(), 0);
    }

    #[test]
    fn given_deep_chain_when_searching_then_does_not_recurse() {
        let mut tree = OrgArena::new();
        let mut parent = None;
        for id in 0..10_000 {
            parent = Some(tree.insert_node(id, format!("e{id}"), parent));
        }
        let root = tree.root().unwrap();
        assert!(tree.find_node(9_999, root).is_some());
        assert!(tree.find_parent(9_999, root).is_some());
        assert_eq!(tree.depth(), 10_000);
    }
}
