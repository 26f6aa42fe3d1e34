use smallvec::smallvec;

use crate::foundation::core::{Rgba, Vec3};
use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::foundation::ids::NodeId;
use crate::graph::layout::layout_tree;
use crate::graph::node::{
    BlendType, Extension, MathOp, Node, NodeKind, Socket, SocketType, Value, VectorType,
};
use crate::graph::node_graph::{
    GroupInterface, Handles, InputRef, Link, NodeGraph, NodeRef, OutputRef, SwitchInputs,
    SwitchSources, Tree, TreeId,
};
use crate::graph::pixel_grid::{PixelGridTree, build_pixel_grid_tree};

/// Name of the optics group tree.
pub const OPTICS_TREE_NAME: &str = "_Projector";

/// Checker squares across the projected image.
pub const CHECKER_SCALE: f64 = 8.0;

/// Builder for one tree. The only place nodes and links can be added.
pub(crate) struct TreeBuilder {
    tree: Tree,
}

impl TreeBuilder {
    pub(crate) fn new(id: TreeId, name: &'static str, interface: GroupInterface) -> Self {
        Self {
            tree: Tree::new(id, name, interface),
        }
    }

    fn push(&mut self, node: Node) -> NodeRef {
        let id = node.id;
        self.tree.nodes.push(Some(node));
        NodeRef {
            tree: self.tree.id,
            node: id,
        }
    }

    fn next_id(&self) -> NodeId {
        NodeId(self.tree.nodes.len() as u32)
    }

    pub(crate) fn add(&mut self, name: &'static str, kind: NodeKind) -> NodeRef {
        self.add_labeled(name, None, kind)
    }

    pub(crate) fn add_labeled(
        &mut self,
        name: &'static str,
        label: Option<&'static str>,
        kind: NodeKind,
    ) -> NodeRef {
        let (inputs, outputs) = match kind {
            NodeKind::GroupInput => (smallvec![], self.tree.interface.inputs.clone()),
            NodeKind::GroupOutput => (self.tree.interface.outputs.clone(), smallvec![]),
            _ => kind.default_sockets(),
        };
        let node = Node {
            id: self.next_id(),
            name,
            label,
            kind,
            inputs,
            outputs,
            location: Default::default(),
        };
        self.push(node)
    }

    /// Instance `inner` as a group node of this tree.
    pub(crate) fn add_group(
        &mut self,
        name: &'static str,
        label: Option<&'static str>,
        inner: &Tree,
    ) -> NodeRef {
        let node = Node {
            id: self.next_id(),
            name,
            label,
            kind: NodeKind::Group { tree: inner.id },
            inputs: inner.interface.inputs.clone(),
            outputs: inner.interface.outputs.clone(),
            location: Default::default(),
        };
        self.push(node)
    }

    fn node(&self, r: NodeRef) -> ProjectorResult<&Node> {
        if r.tree != self.tree.id {
            return Err(ProjectorError::structure(format!(
                "node of {:?} used while building {:?}",
                r.tree, self.tree.id
            )));
        }
        self.tree
            .node(r.node)
            .ok_or_else(|| ProjectorError::structure(format!("node {} missing", r.node.0)))
    }

    pub(crate) fn input(&self, r: NodeRef, name: &str) -> ProjectorResult<InputRef> {
        let node = self.node(r)?;
        let socket = node.input_index(name).ok_or_else(|| {
            ProjectorError::structure(format!("node '{}' has no input '{name}'", node.name))
        })?;
        Ok(InputRef { node: r, socket })
    }

    pub(crate) fn output(&self, r: NodeRef, name: &str) -> ProjectorResult<OutputRef> {
        let node = self.node(r)?;
        let socket = node.output_index(name).ok_or_else(|| {
            ProjectorError::structure(format!("node '{}' has no output '{name}'", node.name))
        })?;
        Ok(OutputRef { node: r, socket })
    }

    /// Set an unlinked input value and return its resolved handle.
    pub(crate) fn set(
        &mut self,
        r: NodeRef,
        input: &str,
        value: Value,
    ) -> ProjectorResult<InputRef> {
        let port = self.input(r, input)?;
        let node = self
            .tree
            .node_mut(r.node)
            .ok_or_else(|| ProjectorError::structure(format!("node {} missing", r.node.0)))?;
        let socket = &mut node.inputs[port.socket as usize];
        if socket.ty != value.socket_type() {
            return Err(ProjectorError::structure(format!(
                "input '{}' of '{}' expects {:?}",
                socket.name, node.name, socket.ty
            )));
        }
        socket.value = value;
        Ok(port)
    }

    /// Set the constant of a `Value` node.
    pub(crate) fn set_constant(&mut self, r: NodeRef, v: f64) -> ProjectorResult<()> {
        let node = self
            .tree
            .node_mut(r.node)
            .ok_or_else(|| ProjectorError::structure(format!("node {} missing", r.node.0)))?;
        match node.outputs.first_mut() {
            Some(socket) if node.kind == NodeKind::Value => {
                socket.value = Value::Float(v);
                Ok(())
            }
            _ => Err(ProjectorError::structure(format!(
                "node '{}' is not a value node",
                node.name
            ))),
        }
    }

    pub(crate) fn link(
        &mut self,
        from: NodeRef,
        output: &str,
        to: NodeRef,
        input: &str,
    ) -> ProjectorResult<()> {
        let out = self.output(from, output)?;
        let inp = self.input(to, input)?;
        self.link_ports(out, inp)
    }

    pub(crate) fn link_ports(&mut self, out: OutputRef, inp: InputRef) -> ProjectorResult<()> {
        let from_ty = self.node(out.node)?.outputs[out.socket as usize].ty;
        let to_ty = self.node(inp.node)?.inputs[inp.socket as usize].ty;
        if !from_ty.connects_to(to_ty) {
            return Err(ProjectorError::structure(format!(
                "cannot link {from_ty:?} to {to_ty:?}"
            )));
        }
        self.tree.set_link(Link {
            from_node: out.node.node,
            from_socket: out.socket,
            to_node: inp.node.node,
            to_socket: inp.socket,
        });
        Ok(())
    }

    pub(crate) fn finish(mut self) -> ProjectorResult<Tree> {
        layout_tree(&mut self.tree)?;
        Ok(self.tree)
    }
}

struct OpticsTree {
    tree: Tree,
    lens_location: InputRef,
    lens_scale: InputRef,
    checker_color: InputRef,
    catalog_sampler: NodeRef,
    group_color: InputRef,
    checker_mix: OutputRef,
    catalog_image: OutputRef,
}

/// Coordinate remap, lens transform and the generated-vs-catalog compositing stage.
fn build_optics_tree() -> ProjectorResult<OpticsTree> {
    let interface = GroupInterface {
        inputs: smallvec![],
        outputs: smallvec![
            Socket::zeroed("texture vector", SocketType::Vector),
            Socket::zeroed("color", SocketType::Color),
        ],
    };
    let mut b = TreeBuilder::new(TreeId::Optics, OPTICS_TREE_NAME, interface);

    let tex_coord = b.add("tex_coord", NodeKind::TexCoord);

    // The cone's default coordinates are mirrored on both axes relative to the viewer.
    let flip = b.add_labeled(
        "flip",
        Some("Orientation"),
        NodeKind::Mapping {
            vector_type: VectorType::Texture,
        },
    );
    b.set(flip, "Scale", Value::Vector(Vec3::new(-1.0, -1.0, 1.0)))?;

    let split = b.add("split", NodeKind::SeparateXyz);
    let divide_x = b.add(
        "divide_x",
        NodeKind::Math {
            op: MathOp::Divide,
        },
    );
    let divide_y = b.add(
        "divide_y",
        NodeKind::Math {
            op: MathOp::Divide,
        },
    );
    let combine = b.add("combine", NodeKind::CombineXyz);
    b.set(combine, "Z", Value::Float(1.0))?;

    let lens = b.add_labeled(
        "lens",
        Some("Lens"),
        NodeKind::Mapping {
            vector_type: VectorType::Texture,
        },
    );
    let lens_location = b.input(lens, "Location")?;
    let lens_scale = b.input(lens, "Scale")?;

    let center = b.add(
        "center",
        NodeKind::MixRgb {
            blend: BlendType::Add,
            clamp: false,
        },
    );
    b.set(center, "Fac", Value::Float(1.0))?;
    b.set(center, "Color2", Value::Color(Rgba::MID_GREY))?;

    let catalog = b.add(
        "catalog_image",
        NodeKind::ImageTexture {
            image: None,
            extension: Extension::Clip,
        },
    );

    let checker = b.add("checker", NodeKind::CheckerTexture);
    b.set(checker, "Color1", Value::Color(Rgba::WHITE))?;
    let checker_color = b.input(checker, "Color2")?;
    b.set(checker, "Scale", Value::Float(CHECKER_SCALE))?;

    let checker_mix = b.add(
        "checker_mix",
        NodeKind::MixRgb {
            blend: BlendType::Mix,
            clamp: false,
        },
    );
    b.set(checker_mix, "Color1", Value::Color(Rgba::TRANSPARENT))?;

    let output = b.add("group_output", NodeKind::GroupOutput);

    b.link(tex_coord, "Normal", flip, "Vector")?;
    b.link(flip, "Vector", split, "Vector")?;
    b.link(split, "X", divide_x, "A")?;
    b.link(split, "Z", divide_x, "B")?;
    b.link(split, "Y", divide_y, "A")?;
    b.link(split, "Z", divide_y, "B")?;
    b.link(divide_x, "Value", combine, "X")?;
    b.link(divide_y, "Value", combine, "Y")?;
    b.link(combine, "Vector", lens, "Vector")?;
    b.link(lens, "Vector", center, "Color1")?;
    b.link(center, "Color", catalog, "Vector")?;
    b.link(center, "Color", checker, "Vector")?;
    b.link(center, "Color", output, "texture vector")?;
    b.link(catalog, "Alpha", checker_mix, "Fac")?;
    b.link(checker, "Color", checker_mix, "Color2")?;

    let group_color = b.input(output, "color")?;
    let checker_mix_out = b.output(checker_mix, "Color")?;
    let catalog_out = b.output(catalog, "Color")?;
    b.link_ports(checker_mix_out, group_color)?;

    Ok(OpticsTree {
        tree: b.finish()?,
        lens_location,
        lens_scale,
        checker_color,
        catalog_sampler: catalog,
        group_color,
        checker_mix: checker_mix_out,
        catalog_image: catalog_out,
    })
}

/// Build the complete fixed topology of one emitter.
///
/// Switchable edges start at checker source, group color to emission, grid hidden. No value
/// that depends on settings is written here; run the propagator over a full settings snapshot
/// afterwards.
#[tracing::instrument]
pub fn build_graph() -> ProjectorResult<NodeGraph> {
    let PixelGridTree {
        tree: pixel_grid,
        width: grid_width,
        height: grid_height,
    } = build_pixel_grid_tree()?;
    let optics = build_optics_tree()?;

    let mut b = TreeBuilder::new(TreeId::Root, "light", GroupInterface::default());
    let group = b.add_group("optics", Some("!! Don't touch !!"), &optics.tree);
    let bound = b.add_labeled(
        "bound_image",
        Some("Add your Image Texture or Movie here"),
        NodeKind::ImageTexture {
            image: None,
            extension: Extension::Clip,
        },
    );
    let emission = b.add("emission", NodeKind::Emission);
    b.set(emission, "Strength", Value::Float(1.0))?;
    let grid = b.add_group("pixel_grid", Some("Pixel Grid"), &pixel_grid);
    let light_output = b.add("light_output", NodeKind::LightOutput);

    b.link(group, "texture vector", bound, "Vector")?;
    b.link(group, "texture vector", grid, "Vector")?;
    b.link(emission, "Emission", grid, "Shader")?;

    let emission_color = b.input(emission, "Color")?;
    let light_surface = b.input(light_output, "Surface")?;
    let optics_group = b.output(group, "color")?;
    let bound_image = b.output(bound, "Color")?;
    let emission_out = b.output(emission, "Emission")?;
    let grid_out = b.output(grid, "Shader")?;
    b.link_ports(optics_group, emission_color)?;
    b.link_ports(emission_out, light_surface)?;

    let handles = Handles {
        lens_location: optics.lens_location,
        lens_scale: optics.lens_scale,
        checker_color: optics.checker_color,
        catalog_sampler: optics.catalog_sampler,
        bound_sampler: bound,
        grid_width,
        grid_height,
        switch_inputs: SwitchInputs {
            group_color: optics.group_color,
            emission_color,
            light_surface,
        },
        switch_sources: SwitchSources {
            checker_mix: optics.checker_mix,
            catalog_image: optics.catalog_image,
            optics_group,
            bound_image,
            emission: emission_out,
            pixel_grid: grid_out,
        },
    };

    let mut graph = NodeGraph {
        root: b.finish()?,
        optics: optics.tree,
        pixel_grid,
        handles,
        built_links: 0,
    };
    graph.built_links = graph.link_count();
    graph.validate()?;
    tracing::debug!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "built emitter graph"
    );
    Ok(graph)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/builder.rs"]
mod tests;
