use super::*;

use crate::assets::store::ImageDesc;
use crate::settings::catalog::Resolution;

#[test]
fn names_are_unique() {
    let mut scene = Scene::default();
    let a = scene.create_projector(0).unwrap();
    let b = scene.create_projector(1).unwrap();
    let c = scene.create_projector(2).unwrap();
    assert_eq!(scene.get(a).unwrap().controller.name, "Projector");
    assert_eq!(scene.get(b).unwrap().controller.name, "Projector.001");
    assert_eq!(scene.get(c).unwrap().controller.name, "Projector.002");

    scene.delete(b).unwrap();
    let d = scene.create_projector(3).unwrap();
    assert_eq!(scene.get(d).unwrap().controller.name, "Projector.001");
}

#[test]
fn create_selects_only_the_new_projector_at_the_cursor() {
    let mut scene = Scene::default();
    scene.create_projector(0).unwrap();
    scene.cursor.location = crate::foundation::core::Vec3::new(1.0, 2.0, 3.0);
    let b = scene.create_projector(1).unwrap();

    let selected: Vec<_> = scene.projectors(true).map(|p| p.id).collect();
    assert_eq!(selected, [b]);
    assert_eq!(scene.get(b).unwrap().controller.transform, scene.cursor);
    assert_eq!(scene.projectors(false).count(), 2);
}

#[test]
fn catalog_images_are_created_once() {
    let mut scene = Scene::default();
    scene.create_projector(0).unwrap();
    scene.create_projector(1).unwrap();
    assert_eq!(scene.store().len(), Resolution::ALL.len());
}

#[test]
fn delete_selected_removes_only_selected() {
    let mut scene = Scene::default();
    let a = scene.create_projector(0).unwrap();
    let b = scene.create_projector(1).unwrap();
    let c = scene.create_projector(2).unwrap();
    scene.select(a, true).unwrap();
    assert_eq!(scene.delete_selected(), 2);
    assert!(scene.get(a).is_err());
    assert!(scene.get(c).is_err());
    assert!(scene.get(b).is_ok());
}

#[test]
fn unknown_projector_is_reported() {
    let mut scene = Scene::default();
    let err = scene
        .apply(ProjectorId(99), SettingChange::Power(1.0))
        .unwrap_err();
    assert!(matches!(err, ProjectorError::UnknownProjector(ProjectorId(99))));
}

#[test]
fn randomize_color_needs_exactly_one_selection() {
    let mut scene = Scene::default();
    let a = scene.create_projector(0).unwrap();
    let b = scene.create_projector(1).unwrap();

    assert_eq!(scene.randomize_color(11).unwrap(), b);
    assert_eq!(
        scene.get(b).unwrap().controller.settings.projected_color,
        random_color(11)
    );

    scene.select(a, true).unwrap();
    assert!(scene.randomize_color(12).is_err());
    scene.deselect_all();
    assert!(scene.randomize_color(12).is_err());
}

#[test]
fn apply_recovers_from_damage() {
    let mut scene = Scene::default();
    let id = scene.create_projector(0).unwrap();
    let idx = scene.index(id).unwrap();
    let grid = scene.projectors[idx].emitter.graph.handles().grid_width;
    scene.projectors[idx].emitter.graph.remove_node(grid);

    scene
        .apply(id, SettingChange::Resolution(Resolution::Svga))
        .unwrap();
    let graph = &scene.get(id).unwrap().emitter.graph;
    assert!(graph.validate().is_ok());
    assert_eq!(
        crate::optics::overlay::resolution(graph).unwrap(),
        (800.0, 600.0)
    );
}

#[test]
fn bind_image_checks_the_store() {
    let mut scene = Scene::default();
    let id = scene.create_projector(0).unwrap();
    assert!(scene.bind_image(id, Some(ImageId(1000))).is_err());

    let img = scene
        .store_mut()
        .create(ImageDesc::color_grid("clip.png", 640, 480))
        .unwrap();
    scene.bind_image(id, Some(img)).unwrap();
    let p = scene.get(id).unwrap();
    assert_eq!(p.controller.bound_image, Some(img));
    let h = *p.emitter.graph.handles();
    assert_eq!(p.emitter.graph.image(h.bound_sampler).unwrap(), Some(img));

    scene.bind_image(id, None).unwrap();
    assert_eq!(scene.get(id).unwrap().controller.bound_image, None);
}
