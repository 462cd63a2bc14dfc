//! Conversion of org charts into printable `termtree` trees.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Employee, EmployeeId, EmployeeNode, OrgArena};

pub trait TreeNodeConvert {
    /// Build a printable tree; `show_ids` appends `(#id)` to every name.
    fn to_tree_string(&self, show_ids: bool) -> Tree<String>;
}

fn label(id: EmployeeId, name: &str, show_ids: bool) -> String {
    if show_ids {
        format!("{} (#{})", name, id)
    } else {
        name.to_string()
    }
}

impl TreeNodeConvert for Employee {
    fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        let leaves: Vec<_> = self
            .subordinates
            .iter()
            .map(|c| c.to_tree_string(show_ids))
            .collect();

        Tree::new(label(self.id, &self.name, show_ids)).with_leaves(leaves)
    }
}

impl TreeNodeConvert for OrgArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        fn node_label(node: &EmployeeNode, show_ids: bool) -> String {
            label(node.id, &node.name, show_ids)
        }

        fn build_tree(arena: &OrgArena, node_idx: Index, parent_tree: &mut Tree<String>, show_ids: bool) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.subordinates {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(node_label(child, show_ids));
                        build_tree(arena, child_idx, &mut child_tree, show_ids);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        match self.root().and_then(|root| self.get_node(root).map(|node| (root, node))) {
            Some((root_idx, root)) => {
                let mut tree = Tree::new(node_label(root, show_ids));
                build_tree(self, root_idx, &mut tree, show_ids);
                tree
            }
            None => Tree::new("Empty chart".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> Employee {
        Employee::new(1, "root").with_subordinates([
            Employee::new(2, "a").with_subordinates([Employee::new(4, "c")]),
            Employee::new(3, "b"),
        ])
    }

    #[test]
    fn given_arena_when_rendering_then_matches_nested_rendering() {
        let employee = chart();
        let arena = OrgArena::from_employee(&employee).unwrap();
        assert_eq!(
            arena.to_tree_string(true).to_string(),
            employee.to_tree_string(true).to_string()
        );
    }

    #[test]
    fn given_show_ids_when_rendering_then_labels_carry_ids() {
        let rendered = chart().to_tree_string(true).to_string();
        assert!(rendered.starts_with("root (#1)"));
        assert!(rendered.contains("c (#4)"));
        assert!(!chart().to_tree_string(false).to_string().contains("#"));
    }

    #[test]
    fn given_empty_arena_when_rendering_then_placeholder() {
        assert_eq!(
            OrgArena::new().to_tree_string(false).to_string().trim(),
            "Empty chart"
        );
    }
}
