//! Stateless placement of nodes for editors that display the graph.
//!
//! Nodes are placed in columns by longest-path depth from the tree's sources and stacked
//! downwards within a column in insertion order. Placement has no effect on evaluation.

use std::collections::BTreeMap;

use crate::foundation::core::Point;
use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::foundation::ids::NodeId;
use crate::graph::node_graph::Tree;

const COLUMN_WIDTH: f64 = 220.0;
const ROW_HEIGHT: f64 = 180.0;

/// Kahn order of the live nodes; fails if the links contain a cycle.
pub fn topological_order(tree: &Tree) -> ProjectorResult<Vec<NodeId>> {
    let mut indegree: BTreeMap<NodeId, usize> = tree.nodes().map(|n| (n.id, 0)).collect();
    for link in tree.links() {
        if let Some(d) = indegree.get_mut(&link.to_node) {
            *d += 1;
        }
    }

    let mut ready: Vec<NodeId> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(id, _)| *id)
        .collect();
    ready.reverse();

    let mut order = Vec::with_capacity(indegree.len());
    while let Some(id) = ready.pop() {
        order.push(id);
        for link in tree.links().iter().filter(|l| l.from_node == id) {
            if let Some(d) = indegree.get_mut(&link.to_node) {
                *d -= 1;
                if *d == 0 {
                    ready.push(link.to_node);
                }
            }
        }
    }

    if order.len() != indegree.len() {
        return Err(ProjectorError::structure(format!(
            "tree '{}' contains a cycle",
            tree.name
        )));
    }
    Ok(order)
}

/// Assign every node of `tree` a location.
pub(crate) fn layout_tree(tree: &mut Tree) -> ProjectorResult<()> {
    let order = topological_order(tree)?;

    let mut depth: BTreeMap<NodeId, usize> = BTreeMap::new();
    for id in &order {
        let d = tree
            .links()
            .iter()
            .filter(|l| l.to_node == *id)
            .filter_map(|l| depth.get(&l.from_node))
            .map(|d| d + 1)
            .max()
            .unwrap_or(0);
        depth.insert(*id, d);
    }

    let mut rows: BTreeMap<usize, usize> = BTreeMap::new();
    let ids: Vec<NodeId> = tree.nodes().map(|n| n.id).collect();
    for id in ids {
        let column = depth.get(&id).copied().unwrap_or(0);
        let row = rows.entry(column).or_insert(0);
        if let Some(node) = tree.node_mut(id) {
            node.location = Point::new(column as f64 * COLUMN_WIDTH, -(*row as f64) * ROW_HEIGHT);
        }
        *row += 1;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/graph/layout.rs"]
mod tests;
