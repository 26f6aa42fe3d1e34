use super::*;

use crate::graph::builder::build_graph;
use crate::graph::node_graph::{Link, TreeId};

#[test]
fn order_respects_links() {
    let g = build_graph().unwrap();
    for id in TreeId::ALL {
        let tree = g.tree(id);
        let order = topological_order(tree).unwrap();
        assert_eq!(order.len(), tree.node_count());
        let pos = |n: NodeId| order.iter().position(|x| *x == n).unwrap();
        for l in tree.links() {
            assert!(pos(l.from_node) < pos(l.to_node));
        }
    }
}

#[test]
fn layout_places_consumers_right_of_producers() {
    let g = build_graph().unwrap();
    let tree = g.tree(TreeId::Optics);
    for l in tree.links() {
        let from = tree.node(l.from_node).unwrap().location;
        let to = tree.node(l.to_node).unwrap().location;
        assert!(from.x < to.x, "{:?} -> {:?}", l.from_node, l.to_node);
    }
}

#[test]
fn cycle_is_rejected() {
    let g = build_graph().unwrap();
    let mut tree = g.tree(TreeId::Optics).clone();
    let split = tree.find("split").unwrap().id;
    let flip = tree.find("flip").unwrap().id;
    tree.links.push(Link {
        from_node: split,
        from_socket: 0,
        to_node: flip,
        to_socket: 1,
    });
    let err = topological_order(&tree).unwrap_err();
    assert!(matches!(err, ProjectorError::Structure(_)));
}
