use serde::Serialize;

use crate::assets::store::ImageStore;
use crate::foundation::core::Transform3;
use crate::foundation::error::ProjectorResult;
use crate::foundation::ids::{ImageId, ProjectorId};
use crate::foundation::math::random_color;
use crate::graph::builder::build_graph;
use crate::graph::node_graph::NodeGraph;
use crate::optics::propagate::Propagator;
use crate::settings::model::{ProjectorSettings, SettingChange};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// How the controller's lens is specified.
pub enum LensUnit {
    /// Focal length in millimetres.
    #[default]
    Millimeters,
    /// Field-of-view angle.
    FieldOfView,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Camera-style lens on the controller object.
pub struct CameraLens {
    /// Lens unit.
    pub lens_unit: LensUnit,
    /// Horizontal field-of-view angle in radians.
    pub angle: f64,
    /// Sensor width in millimetres.
    pub sensor_width: f64,
    /// Horizontal shift, fraction of the image width.
    pub shift_x: f64,
    /// Vertical shift, fraction of the image width.
    pub shift_y: f64,
    /// Viewport display size.
    pub display_size: f64,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            lens_unit: LensUnit::Millimeters,
            angle: 0.0,
            sensor_width: 36.0,
            shift_x: 0.0,
            shift_y: 0.0,
            display_size: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// User-facing object that carries the settings and the lens.
pub struct Controller {
    /// Unique object name.
    pub name: String,
    /// World transform.
    pub transform: Transform3,
    /// Lens parameters written by the propagator.
    pub lens: CameraLens,
    /// Current settings.
    pub settings: ProjectorSettings,
    /// Image the user bound for the custom texture source.
    pub bound_image: Option<ImageId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Spot light parameters of the emitter.
pub struct SpotLight {
    /// Radiant power in watts.
    pub energy: f64,
    /// Cone angle in radians.
    pub spot_size: f64,
    /// Cone edge softness.
    pub spot_blend: f64,
    /// Light source radius.
    pub shadow_soft_size: f64,
    /// Multiple importance sampling.
    pub use_mis: bool,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            energy: 0.0,
            spot_size: std::f64::consts::PI,
            spot_blend: 0.0,
            shadow_soft_size: 1e-8,
            use_mis: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Light child of the controller that owns the node graph.
pub struct Emitter {
    /// Object name.
    pub name: String,
    /// Transform relative to the controller.
    pub transform: Transform3,
    /// Whether the viewport may select it.
    pub selectable: bool,
    /// Light parameters.
    pub light: SpotLight,
    /// Node graph, owned exclusively by this emitter.
    pub graph: NodeGraph,
}

impl Emitter {
    fn new(name: String) -> ProjectorResult<Self> {
        Ok(Self {
            name,
            transform: Transform3::uniform_scale(0.01),
            selectable: false,
            light: SpotLight::default(),
            graph: build_graph()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A controller with its emitter.
pub struct Projector {
    /// Scene id.
    pub id: ProjectorId,
    /// Controller object.
    pub controller: Controller,
    /// Emitter object.
    pub emitter: Emitter,
    /// Selection state.
    pub selected: bool,
}

impl Projector {
    /// Build the objects and graph with default settings. No values are propagated yet.
    pub fn new(id: ProjectorId, name: String, transform: Transform3) -> ProjectorResult<Self> {
        let emitter = Emitter::new(format!("{name}.spot"))?;
        Ok(Self {
            id,
            controller: Controller {
                name,
                transform,
                lens: CameraLens::default(),
                settings: ProjectorSettings::default(),
                bound_image: None,
            },
            emitter,
            selected: false,
        })
    }

    /// Defaults with a seeded checker color, then every handler once in initialisation order.
    #[tracing::instrument(skip(self, store), fields(projector = %self.id))]
    pub fn init<S: ImageStore + ?Sized>(&mut self, seed: u64, store: &mut S) -> ProjectorResult<()> {
        self.controller.settings = ProjectorSettings {
            projected_color: random_color(seed),
            ..ProjectorSettings::default()
        };
        self.propagator(store).apply_all()
    }

    /// Store a change in the settings and propagate it.
    pub fn apply<S: ImageStore + ?Sized>(
        &mut self,
        change: SettingChange,
        store: &mut S,
    ) -> ProjectorResult<()> {
        change.apply_to(&mut self.controller.settings);
        self.propagator(store).on_parameter_changed(change.field())
    }

    /// Replace all settings and propagate every field.
    pub fn apply_snapshot<S: ImageStore + ?Sized>(
        &mut self,
        settings: ProjectorSettings,
        store: &mut S,
    ) -> ProjectorResult<()> {
        self.controller.settings = settings;
        self.propagator(store).apply_all()
    }

    /// Bind or clear the user image and re-run the resolution cascade.
    pub fn bind_image<S: ImageStore + ?Sized>(
        &mut self,
        image: Option<ImageId>,
        store: &mut S,
    ) -> ProjectorResult<()> {
        self.controller.bound_image = image;
        self.propagator(store).update_bound_image()
    }

    /// Throw the graph away, build a fresh one and re-apply the current settings.
    #[tracing::instrument(skip(self, store), fields(projector = %self.id))]
    pub fn rebuild_graph<S: ImageStore + ?Sized>(&mut self, store: &mut S) -> ProjectorResult<()> {
        self.emitter.graph = build_graph()?;
        self.propagator(store).apply_all()
    }

    pub(crate) fn propagator<'a, S: ImageStore + ?Sized>(
        &'a mut self,
        store: &'a mut S,
    ) -> Propagator<'a, S> {
        Propagator::new(&mut self.controller, &mut self.emitter, store)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/projector.rs"]
mod tests;
