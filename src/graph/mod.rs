//! Emitter node graph: primitive nodes, the fixed three-tree topology and its builders.

pub(crate) mod builder;
pub(crate) mod fingerprint;
pub(crate) mod layout;
pub(crate) mod node;
pub(crate) mod node_graph;
pub(crate) mod pixel_grid;
