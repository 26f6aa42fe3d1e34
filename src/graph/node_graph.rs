use serde::Serialize;

use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::foundation::ids::{ImageId, NodeId};
use crate::graph::node::{Node, NodeKind, Sockets, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
/// The three trees every emitter graph consists of.
pub enum TreeId {
    /// Top-level light tree: samplers, emission and light output.
    Root,
    /// Optics group: coordinate remap, lens transform and source compositing.
    Optics,
    /// Pixel-grid overlay group.
    PixelGrid,
}

impl TreeId {
    /// All trees in construction order.
    pub const ALL: [TreeId; 3] = [TreeId::Root, TreeId::Optics, TreeId::PixelGrid];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// A node in a specific tree.
pub struct NodeRef {
    /// Owning tree.
    pub tree: TreeId,
    /// Node inside the tree.
    pub node: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// An input socket, resolved to its index once at build time.
pub struct InputRef {
    /// Owning node.
    pub node: NodeRef,
    /// Input socket index.
    pub socket: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// An output socket, resolved to its index once at build time.
pub struct OutputRef {
    /// Owning node.
    pub node: NodeRef,
    /// Output socket index.
    pub socket: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
/// Directed edge from an output socket to an input socket of the same tree.
pub struct Link {
    /// Source node.
    pub from_node: NodeId,
    /// Source output socket index.
    pub from_socket: u8,
    /// Target node.
    pub to_node: NodeId,
    /// Target input socket index.
    pub to_socket: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Sockets a tree exposes when instanced as a group.
pub struct GroupInterface {
    /// Group inputs (outputs of the inner `GroupInput` node).
    pub inputs: Sockets,
    /// Group outputs (inputs of the inner `GroupOutput` node).
    pub outputs: Sockets,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One node tree: an arena of nodes plus its links.
pub struct Tree {
    /// Tree id.
    pub id: TreeId,
    /// Display name.
    pub name: &'static str,
    /// Group interface (empty for the root tree).
    pub interface: GroupInterface,
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) links: Vec<Link>,
}

impl Tree {
    pub(crate) fn new(id: TreeId, name: &'static str, interface: GroupInterface) -> Self {
        Self {
            id,
            name,
            interface,
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// All links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Node by id, if present.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Node by unique name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.nodes().find(|n| n.name == name)
    }

    /// Link feeding a given input socket, if any.
    pub fn link_into(&self, node: NodeId, socket: u8) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.to_node == node && l.to_socket == socket)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    /// Insert or replace the single link feeding `(to_node, to_socket)`.
    ///
    /// A replaced link keeps its position, so relinking never reorders the link list.
    pub(crate) fn set_link(&mut self, link: Link) {
        match self
            .links
            .iter_mut()
            .find(|l| l.to_node == link.to_node && l.to_socket == link.to_socket)
        {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Candidate producers for the optics group's color output.
pub enum GroupColorSource {
    /// Checker pattern masked by the catalog image's alpha.
    CheckerMix,
    /// Catalog (color grid) image sampler.
    CatalogImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Candidate producers for the emission color.
pub enum EmissionColorSource {
    /// Color output of the optics group.
    OpticsGroup,
    /// User-bound image sampler in the root tree.
    BoundImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Candidate producers for the light output surface.
pub enum SurfaceSource {
    /// Plain emission shader.
    Emission,
    /// Pixel-grid overlay group.
    PixelGrid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "edge", content = "source", rename_all = "snake_case")]
/// The only edges that may change after construction, with their allowed sources.
pub enum Switch {
    /// Optics group output `color`.
    GroupColor(GroupColorSource),
    /// Emission `Color` input.
    EmissionColor(EmissionColorSource),
    /// Light output `Surface` input.
    LightSurface(SurfaceSource),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Switchable edge without a chosen source.
pub enum SwitchEdge {
    /// See [`Switch::GroupColor`].
    GroupColor,
    /// See [`Switch::EmissionColor`].
    EmissionColor,
    /// See [`Switch::LightSurface`].
    LightSurface,
}

impl Switch {
    /// The edge this switch position belongs to.
    pub fn edge(self) -> SwitchEdge {
        match self {
            Switch::GroupColor(_) => SwitchEdge::GroupColor,
            Switch::EmissionColor(_) => SwitchEdge::EmissionColor,
            Switch::LightSurface(_) => SwitchEdge::LightSurface,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Ports and nodes the propagator writes to, resolved once at build time.
pub struct Handles {
    /// Lens mapping `Location` input (lens shift).
    pub lens_location: InputRef,
    /// Lens mapping `Scale` input (throw ratio and aspect).
    pub lens_scale: InputRef,
    /// Checker `Color2` input (projected color).
    pub checker_color: InputRef,
    /// Catalog image sampler inside the optics group.
    pub catalog_sampler: NodeRef,
    /// User-bound image sampler in the root tree.
    pub bound_sampler: NodeRef,
    /// Pixel-grid width constant.
    pub grid_width: NodeRef,
    /// Pixel-grid height constant.
    pub grid_height: NodeRef,
    /// Inputs of the switchable edges.
    pub switch_inputs: SwitchInputs,
    /// Producers the switchable edges may be connected to.
    pub switch_sources: SwitchSources,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Targets of the switchable edges.
pub struct SwitchInputs {
    /// Optics group output `color`.
    pub group_color: InputRef,
    /// Emission `Color`.
    pub emission_color: InputRef,
    /// Light output `Surface`.
    pub light_surface: InputRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Producers the switchable edges may be connected to.
pub struct SwitchSources {
    /// Checker mix `Color`.
    pub checker_mix: OutputRef,
    /// Catalog image sampler `Color`.
    pub catalog_image: OutputRef,
    /// Optics group node `color`.
    pub optics_group: OutputRef,
    /// Bound image sampler `Color`.
    pub bound_image: OutputRef,
    /// Emission `Emission`.
    pub emission: OutputRef,
    /// Pixel-grid group node `Shader`.
    pub pixel_grid: OutputRef,
}

impl Handles {
    fn switch_input(&self, edge: SwitchEdge) -> InputRef {
        match edge {
            SwitchEdge::GroupColor => self.switch_inputs.group_color,
            SwitchEdge::EmissionColor => self.switch_inputs.emission_color,
            SwitchEdge::LightSurface => self.switch_inputs.light_surface,
        }
    }

    fn switch_source(&self, switch: Switch) -> OutputRef {
        let s = &self.switch_sources;
        match switch {
            Switch::GroupColor(GroupColorSource::CheckerMix) => s.checker_mix,
            Switch::GroupColor(GroupColorSource::CatalogImage) => s.catalog_image,
            Switch::EmissionColor(EmissionColorSource::OpticsGroup) => s.optics_group,
            Switch::EmissionColor(EmissionColorSource::BoundImage) => s.bound_image,
            Switch::LightSurface(SurfaceSource::Emission) => s.emission,
            Switch::LightSurface(SurfaceSource::PixelGrid) => s.pixel_grid,
        }
    }

    fn positions(edge: SwitchEdge) -> [Switch; 2] {
        match edge {
            SwitchEdge::GroupColor => [
                Switch::GroupColor(GroupColorSource::CheckerMix),
                Switch::GroupColor(GroupColorSource::CatalogImage),
            ],
            SwitchEdge::EmissionColor => [
                Switch::EmissionColor(EmissionColorSource::OpticsGroup),
                Switch::EmissionColor(EmissionColorSource::BoundImage),
            ],
            SwitchEdge::LightSurface => [
                Switch::LightSurface(SurfaceSource::Emission),
                Switch::LightSurface(SurfaceSource::PixelGrid),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Node graph owned by one emitter.
///
/// The node and link sets are fixed once built. Runtime code may only overwrite socket values,
/// rebind image samplers, set constants, and move the three [`SwitchEdge`]s between their two
/// allowed sources.
pub struct NodeGraph {
    pub(crate) root: Tree,
    pub(crate) optics: Tree,
    pub(crate) pixel_grid: Tree,
    pub(crate) handles: Handles,
    /// Link total at build time. Switching replaces links in place, so this never changes.
    #[serde(skip)]
    pub(crate) built_links: usize,
}

impl NodeGraph {
    /// Tree by id.
    pub fn tree(&self, id: TreeId) -> &Tree {
        match id {
            TreeId::Root => &self.root,
            TreeId::Optics => &self.optics,
            TreeId::PixelGrid => &self.pixel_grid,
        }
    }

    fn tree_mut(&mut self, id: TreeId) -> &mut Tree {
        match id {
            TreeId::Root => &mut self.root,
            TreeId::Optics => &mut self.optics,
            TreeId::PixelGrid => &mut self.pixel_grid,
        }
    }

    /// Cached write targets.
    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    /// Total live nodes across all trees.
    pub fn node_count(&self) -> usize {
        TreeId::ALL.iter().map(|t| self.tree(*t).node_count()).sum()
    }

    /// Total links across all trees.
    pub fn link_count(&self) -> usize {
        TreeId::ALL.iter().map(|t| self.tree(*t).links.len()).sum()
    }

    /// Node by reference, or a structure error if it disappeared.
    pub fn node(&self, r: NodeRef) -> ProjectorResult<&Node> {
        self.tree(r.tree)
            .node(r.node)
            .ok_or_else(|| missing_node(r))
    }

    fn node_mut(&mut self, r: NodeRef) -> ProjectorResult<&mut Node> {
        self.tree_mut(r.tree)
            .node_mut(r.node)
            .ok_or_else(|| missing_node(r))
    }

    /// Current value of an input socket.
    pub fn input_value(&self, port: InputRef) -> ProjectorResult<Value> {
        let node = self.node(port.node)?;
        node.inputs
            .get(port.socket as usize)
            .map(|s| s.value)
            .ok_or_else(|| missing_socket(port.node, port.socket))
    }

    /// Overwrite the value of an input socket.
    pub fn set_input(&mut self, port: InputRef, value: Value) -> ProjectorResult<()> {
        let node = self.node_mut(port.node)?;
        let socket = node
            .inputs
            .get_mut(port.socket as usize)
            .ok_or_else(|| missing_socket(port.node, port.socket))?;
        if socket.ty != value.socket_type() {
            return Err(ProjectorError::structure(format!(
                "socket '{}' expects {:?}, got {:?}",
                socket.name,
                socket.ty,
                value.socket_type()
            )));
        }
        socket.value = value;
        Ok(())
    }

    /// Constant held by a `Value` node.
    pub fn constant(&self, r: NodeRef) -> ProjectorResult<f64> {
        let node = self.node(r)?;
        if node.kind != NodeKind::Value {
            return Err(ProjectorError::structure(format!(
                "node '{}' is not a value node",
                node.name
            )));
        }
        node.outputs
            .first()
            .and_then(|s| s.value.as_float())
            .ok_or_else(|| missing_socket(r, 0))
    }

    /// Overwrite the constant held by a `Value` node.
    pub fn set_constant(&mut self, r: NodeRef, v: f64) -> ProjectorResult<()> {
        let node = self.node_mut(r)?;
        if node.kind != NodeKind::Value {
            return Err(ProjectorError::structure(format!(
                "node '{}' is not a value node",
                node.name
            )));
        }
        let socket = node.outputs.first_mut().ok_or_else(|| missing_socket(r, 0))?;
        socket.value = Value::Float(v);
        Ok(())
    }

    /// Image bound to a sampler node.
    pub fn image(&self, r: NodeRef) -> ProjectorResult<Option<ImageId>> {
        match &self.node(r)?.kind {
            NodeKind::ImageTexture { image, .. } => Ok(*image),
            _ => Err(not_a_sampler(r)),
        }
    }

    /// Rebind a sampler node to another image.
    pub fn set_image(&mut self, r: NodeRef, id: Option<ImageId>) -> ProjectorResult<()> {
        match &mut self.node_mut(r)?.kind {
            NodeKind::ImageTexture { image, .. } => {
                *image = id;
                Ok(())
            }
            _ => Err(not_a_sampler(r)),
        }
    }

    /// Connect a switchable edge to one of its allowed sources, replacing the previous link.
    pub fn switch(&mut self, switch: Switch) -> ProjectorResult<()> {
        let to = self.handles.switch_input(switch.edge());
        let from = self.handles.switch_source(switch);
        // Both endpoints must still exist.
        self.node(from.node)?;
        self.node(to.node)?;
        self.tree_mut(to.node.tree).set_link(Link {
            from_node: from.node.node,
            from_socket: from.socket,
            to_node: to.node.node,
            to_socket: to.socket,
        });
        Ok(())
    }

    /// Current position of a switchable edge, or `None` if it is unlinked or linked elsewhere.
    pub fn switch_state(&self, edge: SwitchEdge) -> Option<Switch> {
        let to = self.handles.switch_input(edge);
        let link = self.tree(to.node.tree).link_into(to.node.node, to.socket)?;
        Handles::positions(edge).into_iter().find(|candidate| {
            let from = self.handles.switch_source(*candidate);
            from.node.node == link.from_node && from.socket == link.from_socket
        })
    }

    /// Pretty JSON of all three trees and the cached handles, for the external renderer.
    pub fn to_json(&self) -> ProjectorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the fixed node and link sets, cached handles, socket types, switch wiring and
    /// acyclicity of every tree.
    pub fn validate(&self) -> ProjectorResult<()> {
        for id in TreeId::ALL {
            let tree = self.tree(id);
            if let Some(slot) = tree.nodes.iter().position(Option::is_none) {
                return Err(missing_node(NodeRef {
                    tree: id,
                    node: NodeId(slot as u32),
                }));
            }
            for link in &tree.links {
                let from = tree.node(link.from_node).ok_or_else(|| {
                    ProjectorError::structure(format!(
                        "{id:?}: link from missing node {}",
                        link.from_node.0
                    ))
                })?;
                let to = tree.node(link.to_node).ok_or_else(|| {
                    ProjectorError::structure(format!(
                        "{id:?}: link to missing node {}",
                        link.to_node.0
                    ))
                })?;
                let out = from.outputs.get(link.from_socket as usize).ok_or_else(|| {
                    missing_socket(
                        NodeRef {
                            tree: id,
                            node: from.id,
                        },
                        link.from_socket,
                    )
                })?;
                let inp = to.inputs.get(link.to_socket as usize).ok_or_else(|| {
                    missing_socket(
                        NodeRef {
                            tree: id,
                            node: to.id,
                        },
                        link.to_socket,
                    )
                })?;
                if !out.ty.connects_to(inp.ty) {
                    return Err(ProjectorError::structure(format!(
                        "{id:?}: cannot link {}.{} ({:?}) to {}.{} ({:?})",
                        from.name, out.name, out.ty, to.name, inp.name, inp.ty
                    )));
                }
            }
            crate::graph::layout::topological_order(tree)?;
        }
        if self.link_count() != self.built_links {
            return Err(ProjectorError::structure(format!(
                "expected {} links, found {}",
                self.built_links,
                self.link_count()
            )));
        }
        self.validate_handles()?;
        for edge in [
            SwitchEdge::GroupColor,
            SwitchEdge::EmissionColor,
            SwitchEdge::LightSurface,
        ] {
            if self.switch_state(edge).is_none() {
                return Err(ProjectorError::structure(format!(
                    "switch edge {edge:?} is not connected to an allowed source"
                )));
            }
        }
        Ok(())
    }

    fn validate_handles(&self) -> ProjectorResult<()> {
        let h = &self.handles;
        for port in [
            h.lens_location,
            h.lens_scale,
            h.checker_color,
            h.switch_inputs.group_color,
            h.switch_inputs.emission_color,
            h.switch_inputs.light_surface,
        ] {
            self.input_value(port)?;
        }
        let s = &h.switch_sources;
        for port in [
            s.checker_mix,
            s.catalog_image,
            s.optics_group,
            s.bound_image,
            s.emission,
            s.pixel_grid,
        ] {
            if self.node(port.node)?.outputs.get(port.socket as usize).is_none() {
                return Err(missing_socket(port.node, port.socket));
            }
        }
        self.image(h.catalog_sampler)?;
        self.image(h.bound_sampler)?;
        self.constant(h.grid_width)?;
        self.constant(h.grid_height)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn remove_node(&mut self, r: NodeRef) -> bool {
        let tree = self.tree_mut(r.tree);
        let Some(slot) = tree.nodes.get_mut(r.node.0 as usize) else {
            return false;
        };
        let removed = slot.take().is_some();
        tree.links
            .retain(|l| l.from_node != r.node && l.to_node != r.node);
        removed
    }
}

fn missing_node(r: NodeRef) -> ProjectorError {
    ProjectorError::structure(format!("{:?}: node {} is missing", r.tree, r.node.0))
}

fn missing_socket(r: NodeRef, socket: u8) -> ProjectorError {
    ProjectorError::structure(format!(
        "{:?}: node {} has no socket {}",
        r.tree, r.node.0, socket
    ))
}

fn not_a_sampler(r: NodeRef) -> ProjectorError {
    ProjectorError::structure(format!(
        "{:?}: node {} is not an image sampler",
        r.tree, r.node.0
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/graph/node_graph.rs"]
mod tests;
