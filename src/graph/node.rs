use serde::Serialize;
use smallvec::{SmallVec, smallvec};

use crate::foundation::core::{Point, Rgba, Vec3};
use crate::foundation::ids::{ImageId, NodeId};
use crate::graph::node_graph::TreeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Data carried by a socket.
pub enum SocketType {
    /// Scalar.
    Float,
    /// 3-component vector.
    Vector,
    /// RGBA color.
    Color,
    /// Closure produced by shader nodes; has no default value.
    Shader,
}

impl SocketType {
    /// Whether an output of type `self` may feed an input of type `to`.
    ///
    /// Scalars, vectors and colors convert implicitly; shaders only connect to shaders.
    pub fn connects_to(self, to: SocketType) -> bool {
        match (self, to) {
            (SocketType::Shader, SocketType::Shader) => true,
            (SocketType::Shader, _) | (_, SocketType::Shader) => false,
            _ => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
/// Unlinked value of a socket.
pub enum Value {
    /// Scalar value.
    Float(f64),
    /// Vector value.
    Vector(Vec3),
    /// Color value.
    Color(Rgba),
    /// Shader sockets carry no value.
    Shader,
}

impl Value {
    /// Socket type this value belongs to.
    pub fn socket_type(self) -> SocketType {
        match self {
            Value::Float(_) => SocketType::Float,
            Value::Vector(_) => SocketType::Vector,
            Value::Color(_) => SocketType::Color,
            Value::Shader => SocketType::Shader,
        }
    }

    /// Zero value of a socket type.
    pub fn zero(ty: SocketType) -> Self {
        match ty {
            SocketType::Float => Value::Float(0.0),
            SocketType::Vector => Value::Vector(Vec3::ZERO),
            SocketType::Color => Value::Color(Rgba::BLACK),
            SocketType::Shader => Value::Shader,
        }
    }

    /// Scalar payload, if any.
    pub fn as_float(self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Vector payload, if any.
    pub fn as_vector(self) -> Option<Vec3> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Color payload, if any.
    pub fn as_color(self) -> Option<Rgba> {
        match self {
            Value::Color(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Named, typed input or output of a node.
pub struct Socket {
    /// Socket name, unique per side of a node.
    pub name: &'static str,
    /// Socket type.
    #[serde(rename = "type")]
    pub ty: SocketType,
    /// Value used while the socket is unlinked.
    pub value: Value,
}

impl Socket {
    /// Socket with an explicit default value.
    pub fn new(name: &'static str, value: Value) -> Self {
        Self {
            name,
            ty: value.socket_type(),
            value,
        }
    }

    /// Socket initialised to the zero value of its type.
    pub fn zeroed(name: &'static str, ty: SocketType) -> Self {
        Self {
            name,
            ty,
            value: Value::zero(ty),
        }
    }
}

/// Inline socket list; no primitive node has more than four inputs.
pub type Sockets = SmallVec<[Socket; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Scalar arithmetic operation.
pub enum MathOp {
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
    /// Truncated `a mod b`.
    Modulo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Blend mode of an RGB mix.
pub enum BlendType {
    /// Linear interpolation by `Fac`.
    Mix,
    /// Additive.
    Add,
    /// Multiplicative.
    Multiply,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How an image sampler treats coordinates outside `[0, 1]`.
pub enum Extension {
    /// Transparent outside the image.
    Clip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Interpolation between color ramp stops.
pub enum Interpolation {
    /// Hard step at each stop.
    Constant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Direction a mapping node applies its transform in.
pub enum VectorType {
    /// Forward: scale, then rotate, then translate.
    Point,
    /// Inverse of [`VectorType::Point`]: translate by `-Location`, then divide by `Scale`.
    ///
    /// Transforms the texture rather than the coordinate, so a scale of `1/t` magnifies
    /// coordinates by `t`.
    Texture,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// One stop of a color ramp.
pub struct RampStop {
    /// Position in `[0, 1]`.
    pub position: f64,
    /// Color at the stop.
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Primitive operation performed by a node.
pub enum NodeKind {
    /// Surface coordinate source.
    TexCoord,
    /// Affine transform of a vector by `Location`, `Rotation` and `Scale`.
    Mapping {
        /// Forward or inverse transform.
        vector_type: VectorType,
    },
    /// Vector to scalar components.
    SeparateXyz,
    /// Scalar components to vector.
    CombineXyz,
    /// Scalar arithmetic.
    Math {
        /// Operation.
        op: MathOp,
    },
    /// Color mix.
    MixRgb {
        /// Blend mode.
        blend: BlendType,
        /// Clamp the result to `[0, 1]`.
        clamp: bool,
    },
    /// Image sampler.
    ImageTexture {
        /// Sampled image, `None` samples transparent black.
        image: Option<ImageId>,
        /// Out-of-range behaviour.
        extension: Extension,
    },
    /// Procedural two-color checker pattern.
    CheckerTexture,
    /// Scalar to color quantizer.
    ColorRamp {
        /// Interpolation between stops.
        interpolation: Interpolation,
        /// Ordered stops.
        stops: SmallVec<[RampStop; 2]>,
    },
    /// Scalar constant held in the output socket.
    Value,
    /// Fully transparent shader.
    TransparentBsdf,
    /// Blend of two shaders by `Fac`.
    MixShader,
    /// Emissive shader.
    Emission,
    /// Light output terminal.
    LightOutput,
    /// Instance of a nested tree.
    Group {
        /// Nested tree.
        tree: TreeId,
    },
    /// Inputs of the enclosing group, seen from inside.
    GroupInput,
    /// Outputs of the enclosing group, seen from inside.
    GroupOutput,
}

impl NodeKind {
    /// Default input and output sockets of a primitive kind.
    ///
    /// Group-related kinds take their sockets from the tree interface and return empty lists.
    pub fn default_sockets(&self) -> (Sockets, Sockets) {
        use SocketType::*;
        match self {
            NodeKind::TexCoord => (
                smallvec![],
                smallvec![
                    Socket::zeroed("Generated", Vector),
                    Socket::zeroed("Normal", Vector),
                    Socket::zeroed("UV", Vector),
                ],
            ),
            NodeKind::Mapping { .. } => (
                smallvec![
                    Socket::zeroed("Vector", Vector),
                    Socket::new("Location", Value::Vector(Vec3::ZERO)),
                    Socket::new("Rotation", Value::Vector(Vec3::ZERO)),
                    Socket::new("Scale", Value::Vector(Vec3::ONE)),
                ],
                smallvec![Socket::zeroed("Vector", Vector)],
            ),
            NodeKind::SeparateXyz => (
                smallvec![Socket::zeroed("Vector", Vector)],
                smallvec![
                    Socket::zeroed("X", Float),
                    Socket::zeroed("Y", Float),
                    Socket::zeroed("Z", Float),
                ],
            ),
            NodeKind::CombineXyz => (
                smallvec![
                    Socket::zeroed("X", Float),
                    Socket::zeroed("Y", Float),
                    Socket::zeroed("Z", Float),
                ],
                smallvec![Socket::zeroed("Vector", Vector)],
            ),
            NodeKind::Math { .. } => (
                smallvec![
                    Socket::new("A", Value::Float(0.5)),
                    Socket::new("B", Value::Float(0.5)),
                ],
                smallvec![Socket::zeroed("Value", Float)],
            ),
            NodeKind::MixRgb { .. } => (
                smallvec![
                    Socket::new("Fac", Value::Float(0.5)),
                    Socket::new("Color1", Value::Color(Rgba::MID_GREY)),
                    Socket::new("Color2", Value::Color(Rgba::MID_GREY)),
                ],
                smallvec![Socket::zeroed("Color", Color)],
            ),
            NodeKind::ImageTexture { .. } => (
                smallvec![Socket::zeroed("Vector", Vector)],
                smallvec![Socket::zeroed("Color", Color), Socket::zeroed("Alpha", Float)],
            ),
            NodeKind::CheckerTexture => (
                smallvec![
                    Socket::zeroed("Vector", Vector),
                    Socket::new("Color1", Value::Color(Rgba::new(0.8, 0.8, 0.8, 1.0))),
                    Socket::new("Color2", Value::Color(Rgba::new(0.2, 0.2, 0.2, 1.0))),
                    Socket::new("Scale", Value::Float(5.0)),
                ],
                smallvec![Socket::zeroed("Color", Color), Socket::zeroed("Fac", Float)],
            ),
            NodeKind::ColorRamp { .. } => (
                smallvec![Socket::new("Fac", Value::Float(0.5))],
                smallvec![Socket::zeroed("Color", Color), Socket::zeroed("Alpha", Float)],
            ),
            NodeKind::Value => (smallvec![], smallvec![Socket::zeroed("Value", Float)]),
            NodeKind::TransparentBsdf => (
                smallvec![Socket::new("Color", Value::Color(Rgba::WHITE))],
                smallvec![Socket::zeroed("BSDF", Shader)],
            ),
            NodeKind::MixShader => (
                smallvec![
                    Socket::new("Fac", Value::Float(0.5)),
                    Socket::zeroed("Shader", Shader),
                    Socket::zeroed("Shader_001", Shader),
                ],
                smallvec![Socket::zeroed("Shader", Shader)],
            ),
            NodeKind::Emission => (
                smallvec![
                    Socket::new("Color", Value::Color(Rgba::WHITE)),
                    Socket::new("Strength", Value::Float(1.0)),
                ],
                smallvec![Socket::zeroed("Emission", Shader)],
            ),
            NodeKind::LightOutput => (smallvec![Socket::zeroed("Surface", Shader)], smallvec![]),
            NodeKind::Group { .. } | NodeKind::GroupInput | NodeKind::GroupOutput => {
                (smallvec![], smallvec![])
            }
        }
    }

    /// Short, stable tag used in fingerprints and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::TexCoord => "tex_coord",
            NodeKind::Mapping { .. } => "mapping",
            NodeKind::SeparateXyz => "separate_xyz",
            NodeKind::CombineXyz => "combine_xyz",
            NodeKind::Math { .. } => "math",
            NodeKind::MixRgb { .. } => "mix_rgb",
            NodeKind::ImageTexture { .. } => "image_texture",
            NodeKind::CheckerTexture => "checker_texture",
            NodeKind::ColorRamp { .. } => "color_ramp",
            NodeKind::Value => "value",
            NodeKind::TransparentBsdf => "transparent_bsdf",
            NodeKind::MixShader => "mix_shader",
            NodeKind::Emission => "emission",
            NodeKind::LightOutput => "light_output",
            NodeKind::Group { .. } => "group",
            NodeKind::GroupInput => "group_input",
            NodeKind::GroupOutput => "group_output",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A primitive node placed in a tree.
pub struct Node {
    /// Index inside the owning tree.
    pub id: NodeId,
    /// Unique name inside the owning tree.
    pub name: &'static str,
    /// Optional human-readable label.
    pub label: Option<&'static str>,
    /// Operation.
    pub kind: NodeKind,
    /// Input sockets.
    pub inputs: Sockets,
    /// Output sockets.
    pub outputs: Sockets,
    /// Editor location, assigned by the layout pass.
    pub location: Point,
}

impl Node {
    /// Position of the input socket called `name`.
    pub fn input_index(&self, name: &str) -> Option<u8> {
        self.inputs
            .iter()
            .position(|s| s.name == name)
            .map(|i| i as u8)
    }

    /// Position of the output socket called `name`.
    pub fn output_index(&self, name: &str) -> Option<u8> {
        self.outputs
            .iter()
            .position(|s| s.name == name)
            .map(|i| i as u8)
    }
}
