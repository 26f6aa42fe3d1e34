//! Incremental graph updates driven by settings changes.
//!
//! Every handler is a fixed sequence of overwrites through the cached [`Handles`]; nothing here
//! adds nodes or walks the graph. Writes that already landed stay in place when a later write
//! fails.
//!
//! [`Handles`]: crate::graph::node_graph::Handles

use kurbo::Vec2;

use crate::assets::catalog::catalog_image;
use crate::assets::store::ImageStore;
use crate::foundation::core::Vec3;
use crate::foundation::error::ProjectorResult;
use crate::graph::node::Value;
use crate::optics::overlay;
use crate::optics::resolve::{ResolvedResolution, resolve};
use crate::optics::selector::select_source;
use crate::scene::projector::{Controller, Emitter, LensUnit};
use crate::settings::fields::{SettingField, Trigger};

/// Sensor width written to the controller lens, in millimetres.
pub const SENSOR_WIDTH: f64 = 10.0;

/// Horizontal field of view for a throw ratio, with the projection distance normalised to 1.
pub fn field_of_view(throw_ratio: f64) -> f64 {
    2.0 * (0.5 / throw_ratio).atan()
}

/// Lens transform scale: `1/t` horizontally, corrected by the aspect ratio vertically.
pub fn lens_scale(throw_ratio: f64, resolution: ResolvedResolution) -> Vec3 {
    let s = 1.0 / throw_ratio;
    Vec3::new(s, s * resolution.aspect(), 1.0)
}

/// Lens transform translation for shifts given in percent.
pub fn lens_translation(throw_ratio: f64, h_shift: f64, v_shift: f64) -> Vec3 {
    Vec3::from_xy(Vec2::new(h_shift, v_shift) / 100.0 / throw_ratio, 0.0)
}

/// Writes one projector's settings into its controller, emitter and graph.
pub struct Propagator<'a, S: ImageStore + ?Sized> {
    controller: &'a mut Controller,
    emitter: &'a mut Emitter,
    store: &'a mut S,
}

impl<'a, S: ImageStore + ?Sized> Propagator<'a, S> {
    /// Borrow the parts of a projector the handlers write to.
    pub fn new(controller: &'a mut Controller, emitter: &'a mut Emitter, store: &'a mut S) -> Self {
        Self {
            controller,
            emitter,
            store,
        }
    }

    /// Resolution for the current settings and bound image.
    pub fn resolved(&self) -> ResolvedResolution {
        resolve(
            &self.controller.settings,
            self.controller.bound_image,
            &*self.store,
        )
    }

    /// Run the handler `field` triggers.
    #[tracing::instrument(skip_all, fields(field = %field))]
    pub fn on_parameter_changed(&mut self, field: SettingField) -> ProjectorResult<()> {
        match field.spec().trigger {
            Trigger::ThrowRatio => self.update_throw_ratio(),
            Trigger::LensShift => self.update_lens_shift(),
            Trigger::Resolution => self.update_resolution(),
            Trigger::CheckerColor => self.update_checker_color(),
            Trigger::ProjectedTexture => self.update_projected_texture(),
            Trigger::Power => self.update_power(),
            Trigger::PixelGrid => self.update_pixel_grid(),
            Trigger::Keystone => self.update_keystone(),
        }
    }

    /// Every handler once, in initialisation order. The result depends only on the settings
    /// and the bound image.
    pub fn apply_all(&mut self) -> ProjectorResult<()> {
        self.write_bound_sampler()?;
        self.update_throw_ratio()?;
        self.update_projected_texture()?;
        self.update_resolution()?;
        self.update_checker_color()?;
        self.update_lens_shift()?;
        self.update_power()?;
        self.update_pixel_grid()?;
        self.update_keystone()
    }

    /// Field of view, lens scale, lens translation and source selection.
    pub fn update_throw_ratio(&mut self) -> ProjectorResult<()> {
        let settings = self.controller.settings;
        let t = settings.throw_ratio;
        let lens = &mut self.controller.lens;
        lens.lens_unit = LensUnit::FieldOfView;
        lens.angle = field_of_view(t);
        lens.sensor_width = SENSOR_WIDTH;
        lens.display_size = 1.0;

        let resolution = self.resolved();
        let handles = *self.emitter.graph.handles();
        let graph = &mut self.emitter.graph;
        graph.set_input(handles.lens_scale, Value::Vector(lens_scale(t, resolution)))?;
        graph.set_input(
            handles.lens_location,
            Value::Vector(lens_translation(t, settings.h_shift, settings.v_shift)),
        )?;
        select_source(graph, settings.projected_texture)?;
        tracing::debug!(
            throw_ratio = t,
            width = resolution.width,
            height = resolution.height,
            "throw ratio propagated"
        );
        Ok(())
    }

    /// Controller shift and lens translation.
    pub fn update_lens_shift(&mut self) -> ProjectorResult<()> {
        let settings = self.controller.settings;
        self.controller.lens.shift_x = settings.h_shift / 100.0;
        self.controller.lens.shift_y = settings.v_shift / 100.0;
        let handles = *self.emitter.graph.handles();
        self.emitter.graph.set_input(
            handles.lens_location,
            Value::Vector(lens_translation(
                settings.throw_ratio,
                settings.h_shift,
                settings.v_shift,
            )),
        )
    }

    /// Rebind the catalog sampler, then cascade into the aspect-dependent handlers.
    pub fn update_resolution(&mut self) -> ProjectorResult<()> {
        let resolution = self.controller.settings.resolution;
        let image = catalog_image(&mut *self.store, resolution)?;
        let handles = *self.emitter.graph.handles();
        self.emitter
            .graph
            .set_image(handles.catalog_sampler, Some(image))?;
        self.update_throw_ratio()?;
        self.update_grid_resolution()
    }

    /// Checker secondary color.
    pub fn update_checker_color(&mut self) -> ProjectorResult<()> {
        let color = self.controller.settings.projected_color.with_alpha(1.0);
        let handles = *self.emitter.graph.handles();
        self.emitter
            .graph
            .set_input(handles.checker_color, Value::Color(color))
    }

    /// Source selection plus everything that reads the resolved resolution.
    pub fn update_projected_texture(&mut self) -> ProjectorResult<()> {
        self.update_throw_ratio()?;
        self.update_grid_resolution()
    }

    /// Emitter intensity.
    pub fn update_power(&mut self) -> ProjectorResult<()> {
        self.emitter.light.energy = self.controller.settings.power;
        Ok(())
    }

    /// Grid visibility and pixel counts.
    pub fn update_pixel_grid(&mut self) -> ProjectorResult<()> {
        overlay::set_visible(
            &mut self.emitter.graph,
            self.controller.settings.show_pixel_grid,
        )?;
        self.update_grid_resolution()
    }

    /// Keystone correction is not modelled; the values are only stored.
    pub fn update_keystone(&mut self) -> ProjectorResult<()> {
        tracing::debug!(
            h_keystone = self.controller.settings.h_keystone,
            v_keystone = self.controller.settings.v_keystone,
            "keystone has no effect"
        );
        Ok(())
    }

    /// Push the controller's bound image into the graph and follow its new aspect ratio.
    pub fn update_bound_image(&mut self) -> ProjectorResult<()> {
        self.write_bound_sampler()?;
        self.update_throw_ratio()?;
        self.update_grid_resolution()
    }

    fn write_bound_sampler(&mut self) -> ProjectorResult<()> {
        let handles = *self.emitter.graph.handles();
        self.emitter
            .graph
            .set_image(handles.bound_sampler, self.controller.bound_image)
    }

    fn update_grid_resolution(&mut self) -> ProjectorResult<()> {
        let r = self.resolved();
        overlay::set_resolution(&mut self.emitter.graph, r.width, r.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optics/propagate.rs"]
mod tests;
