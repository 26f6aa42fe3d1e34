use super::*;

use crate::assets::store::{ImageDesc, MemoryImageStore};
use crate::foundation::core::Rgb;
use crate::foundation::ids::ProjectorId;
use crate::optics::selector::active_source;
use crate::scene::projector::Projector;
use crate::settings::catalog::Resolution;
use crate::settings::model::ProjectedTexture;

const EPS: f64 = 1e-12;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn projector(store: &mut MemoryImageStore) -> Projector {
    let mut p = Projector::new(ProjectorId(0), "Projector".into(), Default::default()).unwrap();
    p.init(1, store).unwrap();
    p
}

fn lens_scale_of(p: &Projector) -> Vec3 {
    let h = *p.emitter.graph.handles();
    p.emitter
        .graph
        .input_value(h.lens_scale)
        .unwrap()
        .as_vector()
        .unwrap()
}

fn lens_location_of(p: &Projector) -> Vec3 {
    let h = *p.emitter.graph.handles();
    p.emitter
        .graph
        .input_value(h.lens_location)
        .unwrap()
        .as_vector()
        .unwrap()
}

#[test]
fn field_of_view_fixtures() {
    assert!(approx(field_of_view(1.0), 0.9272952180016123));
    assert!(approx(field_of_view(0.8), 1.1171986306871249));
}

#[test]
fn pure_helpers() {
    let r = ResolvedResolution {
        width: 1920.0,
        height: 1080.0,
    };
    let s = lens_scale(2.0, r);
    assert!(approx(s.x, 0.5));
    assert!(approx(s.y, 0.5 * 1080.0 / 1920.0));
    assert_eq!(s.z, 1.0);

    let t = lens_translation(0.5, 10.0, -20.0);
    assert!(approx(t.x, 0.2));
    assert!(approx(t.y, -0.4));
    assert_eq!(t.z, 0.0);
}

#[test]
fn throw_ratio_writes_lens_and_controller() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.throw_ratio = 1.0;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::ThrowRatio)
        .unwrap();

    assert_eq!(p.controller.lens.lens_unit, LensUnit::FieldOfView);
    assert!(approx(p.controller.lens.angle, 0.9272952180016123));
    assert_eq!(p.controller.lens.sensor_width, SENSOR_WIDTH);
    let s = lens_scale_of(&p);
    assert!(approx(s.x, 1.0));
    assert!(approx(s.y, 1080.0 / 1920.0));
}

#[test]
fn shift_writes_controller_and_translation() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.throw_ratio = 1.25;
    p.controller.settings.h_shift = 10.0;
    p.controller.settings.v_shift = -5.0;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::HShift)
        .unwrap();

    assert!(approx(p.controller.lens.shift_x, 0.1));
    assert!(approx(p.controller.lens.shift_y, -0.05));
    let loc = lens_location_of(&p);
    assert!(approx(loc.x, 0.1 / 1.25));
    assert!(approx(loc.y, -0.05 / 1.25));
}

#[test]
fn throw_ratio_keeps_translation_consistent() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.h_shift = 20.0;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::HShift)
        .unwrap();
    p.controller.settings.throw_ratio = 2.0;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::ThrowRatio)
        .unwrap();
    assert!(approx(lens_location_of(&p).x, 0.1));
}

#[test]
fn resolution_rebinds_catalog_and_grid() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.resolution = Resolution::Xga;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::Resolution)
        .unwrap();

    let h = *p.emitter.graph.handles();
    let image = p.emitter.graph.image(h.catalog_sampler).unwrap();
    assert_eq!(image, store.find("_proj.tex.1024x768"));
    assert_eq!(
        crate::optics::overlay::resolution(&p.emitter.graph).unwrap(),
        (1024.0, 768.0)
    );
    assert!(approx(lens_scale_of(&p).y, 0.75 / 0.8));
}

#[test]
fn checker_color_and_power() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.projected_color = Rgb::new(0.1, 0.2, 0.3);
    p.controller.settings.power = 42.0;
    let mut prop = p.propagator(&mut store);
    prop.on_parameter_changed(SettingField::ProjectedColor)
        .unwrap();
    prop.on_parameter_changed(SettingField::Power).unwrap();

    assert_eq!(p.emitter.light.energy, 42.0);
    let h = *p.emitter.graph.handles();
    let c = p.emitter.graph.input_value(h.checker_color).unwrap();
    assert_eq!(c, Value::Color(Rgb::new(0.1, 0.2, 0.3).with_alpha(1.0)));
}

#[test]
fn projected_texture_follows_bound_image_aspect() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    let img = store
        .create(ImageDesc::color_grid("photo.png", 400, 100))
        .unwrap();
    p.controller.bound_image = Some(img);
    p.propagator(&mut store).update_bound_image().unwrap();
    // Still on the checker, so the catalog resolution applies.
    assert!(approx(lens_scale_of(&p).y, (1080.0 / 1920.0) / 0.8));

    p.controller.settings.projected_texture = ProjectedTexture::BoundImage;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::ProjectedTexture)
        .unwrap();
    assert_eq!(
        active_source(&p.emitter.graph),
        Some(ProjectedTexture::BoundImage)
    );
    assert!(approx(lens_scale_of(&p).y, 0.25 / 0.8));
    assert_eq!(
        crate::optics::overlay::resolution(&p.emitter.graph).unwrap(),
        (400.0, 100.0)
    );
}

#[test]
fn keystone_changes_nothing() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    let before = p.clone();
    p.controller.settings.h_keystone = 0.5;
    p.propagator(&mut store)
        .on_parameter_changed(SettingField::HKeystone)
        .unwrap();
    assert_eq!(p.emitter, before.emitter);
    assert_eq!(p.controller.lens, before.controller.lens);
}

#[test]
fn apply_all_twice_is_stable() {
    let mut store = MemoryImageStore::new();
    let mut p = projector(&mut store);
    p.controller.settings.show_pixel_grid = true;
    p.controller.settings.projected_texture = ProjectedTexture::ColorGrid;
    p.propagator(&mut store).apply_all().unwrap();
    let once = p.clone();
    p.propagator(&mut store).apply_all().unwrap();
    assert_eq!(p, once);
}
