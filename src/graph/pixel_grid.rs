use smallvec::smallvec;

use crate::foundation::core::Rgba;
use crate::foundation::error::ProjectorResult;
use crate::graph::builder::TreeBuilder;
use crate::graph::node::{
    BlendType, Interpolation, MathOp, NodeKind, RampStop, Socket, SocketType, Value,
};
use crate::graph::node_graph::{GroupInterface, NodeRef, Tree, TreeId};

/// Name of the pixel-grid group tree.
pub const PIXEL_GRID_TREE_NAME: &str = "_Projectors-Addon_PixelGrid";

/// Fraction of a pixel, per axis, drawn as grid line.
pub const GRID_LINE_WIDTH: f64 = 0.025;

pub(crate) struct PixelGridTree {
    pub(crate) tree: Tree,
    pub(crate) width: NodeRef,
    pub(crate) height: NodeRef,
}

fn step_ramp() -> NodeKind {
    NodeKind::ColorRamp {
        interpolation: Interpolation::Constant,
        stops: smallvec![
            RampStop {
                position: 0.0,
                color: Rgba::BLACK,
            },
            RampStop {
                position: GRID_LINE_WIDTH,
                color: Rgba::WHITE,
            },
        ],
    }
}

/// Overlay that punches transparent lines into the incoming shader at pixel boundaries.
///
/// Per axis: `(coord * dimension) mod 1`, stepped at [`GRID_LINE_WIDTH`]. The two masks are
/// multiplied and pick between a transparent shader (line) and the incoming shader (pixel).
pub(crate) fn build_pixel_grid_tree() -> ProjectorResult<PixelGridTree> {
    let interface = GroupInterface {
        inputs: smallvec![
            Socket::zeroed("Shader", SocketType::Shader),
            Socket::zeroed("Vector", SocketType::Vector),
        ],
        outputs: smallvec![Socket::zeroed("Shader", SocketType::Shader)],
    };
    let mut b = TreeBuilder::new(TreeId::PixelGrid, PIXEL_GRID_TREE_NAME, interface);

    let input = b.add("group_input", NodeKind::GroupInput);
    let split = b.add("split", NodeKind::SeparateXyz);
    let width = b.add_labeled("_width", Some("Width"), NodeKind::Value);
    let height = b.add_labeled("_height", Some("Height"), NodeKind::Value);
    let scale_x = b.add(
        "scale_x",
        NodeKind::Math {
            op: MathOp::Multiply,
        },
    );
    let scale_y = b.add(
        "scale_y",
        NodeKind::Math {
            op: MathOp::Multiply,
        },
    );
    let wrap_x = b.add("wrap_x", NodeKind::Math { op: MathOp::Modulo });
    b.set(wrap_x, "B", Value::Float(1.0))?;
    let wrap_y = b.add("wrap_y", NodeKind::Math { op: MathOp::Modulo });
    b.set(wrap_y, "B", Value::Float(1.0))?;
    let step_x = b.add("step_x", step_ramp());
    let step_y = b.add("step_y", step_ramp());
    let mask = b.add(
        "mask",
        NodeKind::MixRgb {
            blend: BlendType::Multiply,
            clamp: true,
        },
    );
    b.set(mask, "Fac", Value::Float(1.0))?;
    let transparent = b.add("transparent", NodeKind::TransparentBsdf);
    let mix = b.add("mix", NodeKind::MixShader);
    let output = b.add("group_output", NodeKind::GroupOutput);

    b.set_constant(width, 0.0)?;
    b.set_constant(height, 0.0)?;

    b.link(input, "Shader", mix, "Shader_001")?;
    b.link(input, "Vector", split, "Vector")?;
    b.link(split, "X", scale_x, "A")?;
    b.link(width, "Value", scale_x, "B")?;
    b.link(split, "Y", scale_y, "A")?;
    b.link(height, "Value", scale_y, "B")?;
    b.link(scale_x, "Value", wrap_x, "A")?;
    b.link(scale_y, "Value", wrap_y, "A")?;
    b.link(wrap_x, "Value", step_x, "Fac")?;
    b.link(wrap_y, "Value", step_y, "Fac")?;
    b.link(step_x, "Color", mask, "Color1")?;
    b.link(step_y, "Color", mask, "Color2")?;
    b.link(mask, "Color", mix, "Fac")?;
    b.link(transparent, "BSDF", mix, "Shader")?;
    b.link(mix, "Shader", output, "Shader")?;

    Ok(PixelGridTree {
        tree: b.finish()?,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/graph/pixel_grid.rs"]
mod tests;
