use xxhash_rust::xxh3::Xxh3;

use crate::graph::node::{Node, NodeKind, Socket, Value};
use crate::graph::node_graph::{NodeGraph, Tree, TreeId};

const XXH3_SEED: u64 = 0x5d1f_3a97_c0e4_b826;

/// Stable 128-bit digest of a graph's nodes, socket values and links.
///
/// Editor locations are not hashed, so a re-layout does not count as a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct GraphFingerprint {
    /// High half.
    pub hi: u64,
    /// Low half.
    pub lo: u64,
}

impl std::fmt::Display for GraphFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint the full state of `graph`.
pub fn fingerprint_graph(graph: &NodeGraph) -> GraphFingerprint {
    let mut h = StableHasher::new();
    for id in TreeId::ALL {
        write_tree(&mut h, graph.tree(id));
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        // Canonicalize -0.0 so sign-only differences do not change the digest.
        let v = if v == 0.0 { 0.0 } else { v };
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> GraphFingerprint {
        let v = self.inner.digest128();
        GraphFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_tree(h: &mut StableHasher, tree: &Tree) {
    h.write_str(tree.name);
    h.write_u32(tree.nodes.len() as u32);
    for slot in &tree.nodes {
        match slot {
            Some(node) => {
                h.write_bool(true);
                write_node(h, node);
            }
            None => h.write_bool(false),
        }
    }
    // Link order is insertion order and changes on relink; hash the sorted set instead.
    let mut links: Vec<_> = tree
        .links
        .iter()
        .map(|l| (l.to_node.0, l.to_socket, l.from_node.0, l.from_socket))
        .collect();
    links.sort_unstable();
    h.write_u32(links.len() as u32);
    for (to_node, to_socket, from_node, from_socket) in links {
        h.write_u32(to_node);
        h.write_u8(to_socket);
        h.write_u32(from_node);
        h.write_u8(from_socket);
    }
}

fn write_node(h: &mut StableHasher, node: &Node) {
    h.write_str(node.name);
    h.write_str(node.kind.tag());
    match &node.kind {
        NodeKind::Mapping { vector_type } => h.write_u8(*vector_type as u8),
        NodeKind::Math { op } => h.write_u8(*op as u8),
        NodeKind::MixRgb { blend, clamp } => {
            h.write_u8(*blend as u8);
            h.write_bool(*clamp);
        }
        NodeKind::ImageTexture { image, extension } => {
            h.write_bool(image.is_some());
            h.write_u32(image.map_or(0, |i| i.0));
            h.write_u8(*extension as u8);
        }
        NodeKind::ColorRamp {
            interpolation,
            stops,
        } => {
            h.write_u8(*interpolation as u8);
            h.write_u32(stops.len() as u32);
            for stop in stops {
                h.write_f64(stop.position);
                write_value(h, &Value::Color(stop.color));
            }
        }
        NodeKind::Group { tree } => h.write_u8(*tree as u8),
        _ => {}
    }
    for s in node.inputs.iter().chain(node.outputs.iter()) {
        write_socket(h, s);
    }
}

fn write_socket(h: &mut StableHasher, s: &Socket) {
    h.write_str(s.name);
    write_value(h, &s.value);
}

fn write_value(h: &mut StableHasher, v: &Value) {
    match v {
        Value::Float(x) => {
            h.write_u8(0);
            h.write_f64(*x);
        }
        Value::Vector(v) => {
            h.write_u8(1);
            h.write_f64(v.x);
            h.write_f64(v.y);
            h.write_f64(v.z);
        }
        Value::Color(c) => {
            h.write_u8(2);
            h.write_f64(c.r);
            h.write_f64(c.g);
            h.write_f64(c.b);
            h.write_f64(c.a);
        }
        Value::Shader => h.write_u8(3),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/fingerprint.rs"]
mod tests;
