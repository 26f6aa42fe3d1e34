//! Projectors builds and maintains the optical node graph of virtual video projectors.
//!
//! Each projector is a controller object carrying [`ProjectorSettings`] plus an emitter that owns
//! a fixed [`NodeGraph`]. The graph is built once; afterwards every settings change is pushed
//! into it by the [`Propagator`] as a short sequence of direct writes:
//!
//! - [`Scene::create_projector`] builds the graph and applies the defaults
//! - [`Scene::apply`] handles one [`SettingChange`], rebuilding the graph if it was damaged
//! - [`NodeGraph::to_json`] and [`fingerprint_graph`] export the result for a renderer
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;
mod graph;
mod optics;
mod scene;
mod settings;

pub use crate::foundation::core::{Point, Rgb, Rgba, Transform3, Vec2, Vec3};
pub use crate::foundation::error::{ProjectorError, ProjectorResult};
pub use crate::foundation::ids::{ImageId, NodeId, ProjectorId};
pub use crate::foundation::math::random_color;

pub use crate::assets::catalog::{catalog_image, ensure_catalog_images};
pub use crate::assets::store::{
    GeneratedPattern, ImageDesc, ImageEntry, ImageSource, ImageStore, MemoryImageStore,
};

pub use crate::graph::builder::{CHECKER_SCALE, OPTICS_TREE_NAME, build_graph};
pub use crate::graph::fingerprint::{GraphFingerprint, fingerprint_graph};
pub use crate::graph::layout::topological_order;
pub use crate::graph::node::{
    BlendType, Extension, Interpolation, MathOp, Node, NodeKind, RampStop, Socket, SocketType,
    Value, VectorType,
};
pub use crate::graph::node_graph::{
    EmissionColorSource, GroupColorSource, GroupInterface, Handles, InputRef, Link, NodeGraph,
    NodeRef, OutputRef, SurfaceSource, Switch, SwitchEdge, SwitchInputs, SwitchSources, Tree,
    TreeId,
};
pub use crate::graph::pixel_grid::{GRID_LINE_WIDTH, PIXEL_GRID_TREE_NAME};

pub use crate::optics::overlay;
pub use crate::optics::propagate::{
    Propagator, SENSOR_WIDTH, field_of_view, lens_scale, lens_translation,
};
pub use crate::optics::resolve::{ResolvedResolution, resolve, uses_bound_image_resolution};
pub use crate::optics::selector::{active_source, select_source, switches_for};

pub use crate::scene::ops::{PROJECTOR_BASE_NAME, Scene};
pub use crate::scene::projector::{
    CameraLens, Controller, Emitter, LensUnit, Projector, SpotLight,
};

pub use crate::settings::catalog::{Resolution, parse_dimensions};
pub use crate::settings::fields::{Domain, FieldSpec, SettingField, Trigger};
pub use crate::settings::model::{ProjectedTexture, ProjectorSettings, SettingChange};
