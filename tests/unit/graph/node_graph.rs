use super::*;

use crate::foundation::core::Vec3;
use crate::graph::builder::build_graph;

#[test]
fn switch_replaces_link_without_growing() {
    let mut g = build_graph().unwrap();
    let links = g.link_count();
    g.switch(Switch::LightSurface(SurfaceSource::PixelGrid))
        .unwrap();
    assert_eq!(g.link_count(), links);
    assert_eq!(
        g.switch_state(SwitchEdge::LightSurface),
        Some(Switch::LightSurface(SurfaceSource::PixelGrid))
    );
}

#[test]
fn switch_round_trip_restores_links_exactly() {
    let mut g = build_graph().unwrap();
    let before = g.clone();
    g.switch(Switch::EmissionColor(EmissionColorSource::BoundImage))
        .unwrap();
    assert_ne!(g, before);
    g.switch(Switch::EmissionColor(EmissionColorSource::OpticsGroup))
        .unwrap();
    assert_eq!(g, before);
}

#[test]
fn set_input_is_type_checked() {
    let mut g = build_graph().unwrap();
    let h = *g.handles();
    let err = g.set_input(h.lens_scale, Value::Float(2.0)).unwrap_err();
    assert!(err.is_structural());
    g.set_input(h.lens_scale, Value::Vector(Vec3::new(2.0, 1.0, 1.0)))
        .unwrap();
    assert_eq!(
        g.input_value(h.lens_scale).unwrap(),
        Value::Vector(Vec3::new(2.0, 1.0, 1.0))
    );
}

#[test]
fn constants_only_on_value_nodes() {
    let mut g = build_graph().unwrap();
    let h = *g.handles();
    g.set_constant(h.grid_width, 640.0).unwrap();
    assert_eq!(g.constant(h.grid_width).unwrap(), 640.0);
    assert!(g.set_constant(h.catalog_sampler, 1.0).is_err());
    assert!(g.constant(h.bound_sampler).is_err());
}

#[test]
fn images_only_on_samplers() {
    let mut g = build_graph().unwrap();
    let h = *g.handles();
    assert_eq!(g.image(h.bound_sampler).unwrap(), None);
    g.set_image(h.bound_sampler, Some(ImageId(4))).unwrap();
    assert_eq!(g.image(h.bound_sampler).unwrap(), Some(ImageId(4)));
    assert!(g.set_image(h.grid_width, None).is_err());
}

#[test]
fn removed_node_surfaces_as_structure_error() {
    let mut g = build_graph().unwrap();
    let h = *g.handles();
    assert!(g.remove_node(h.lens_scale.node));
    let err = g
        .set_input(h.lens_scale, Value::Vector(Vec3::ONE))
        .unwrap_err();
    assert!(err.is_structural());
    assert!(g.validate().is_err());
}

#[test]
fn validate_reports_every_missing_handle_node() {
    let h = *build_graph().unwrap().handles();
    for r in [
        h.lens_scale.node,
        h.checker_color.node,
        h.catalog_sampler,
        h.bound_sampler,
        h.grid_width,
        h.grid_height,
    ] {
        let mut g = build_graph().unwrap();
        assert!(g.remove_node(r));
        let err = g.validate().unwrap_err();
        assert!(err.is_structural(), "{r:?}: {err}");
    }
}

#[test]
fn validate_catches_dropped_fixed_link() {
    let mut g = build_graph().unwrap();
    assert!(g.validate().is_ok());
    g.optics.links.pop();
    assert!(g.validate().unwrap_err().is_structural());
}

#[test]
fn validate_accepts_every_switch_position() {
    let mut g = build_graph().unwrap();
    g.switch(Switch::GroupColor(GroupColorSource::CatalogImage))
        .unwrap();
    g.switch(Switch::EmissionColor(EmissionColorSource::BoundImage))
        .unwrap();
    g.switch(Switch::LightSurface(SurfaceSource::PixelGrid))
        .unwrap();
    g.validate().unwrap();
}

#[test]
fn validate_catches_unlinked_switch() {
    let mut g = build_graph().unwrap();
    let h = *g.handles();
    assert!(g.remove_node(h.switch_sources.emission.node));
    assert_eq!(g.switch_state(SwitchEdge::LightSurface), None);
    assert!(g.validate().is_err());
}

#[test]
fn json_export_contains_trees_and_links() {
    let g = build_graph().unwrap();
    let v: serde_json::Value = serde_json::from_str(&g.to_json().unwrap()).unwrap();
    assert_eq!(v["optics"]["name"], "_Projector");
    assert!(v["root"]["links"].as_array().unwrap().len() >= 5);
    assert!(v["handles"]["lens_scale"].is_object());
}
