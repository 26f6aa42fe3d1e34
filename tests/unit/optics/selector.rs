use super::*;

use crate::graph::builder::build_graph;
use crate::graph::node_graph::SurfaceSource;

#[test]
fn each_texture_reads_back() {
    let mut g = build_graph().unwrap();
    for t in ProjectedTexture::ALL {
        select_source(&mut g, t).unwrap();
        assert_eq!(active_source(&g), Some(t));
    }
}

#[test]
fn selection_ignores_history() {
    let mut a = build_graph().unwrap();
    let mut b = build_graph().unwrap();
    select_source(&mut a, ProjectedTexture::ColorGrid).unwrap();
    select_source(&mut a, ProjectedTexture::BoundImage).unwrap();
    select_source(&mut b, ProjectedTexture::BoundImage).unwrap();
    assert_eq!(a, b);
}

#[test]
fn selection_leaves_grid_switch_alone() {
    let mut g = build_graph().unwrap();
    g.switch(Switch::LightSurface(SurfaceSource::PixelGrid))
        .unwrap();
    for t in ProjectedTexture::ALL {
        select_source(&mut g, t).unwrap();
        assert_eq!(
            g.switch_state(SwitchEdge::LightSurface),
            Some(Switch::LightSurface(SurfaceSource::PixelGrid))
        );
    }
}

#[test]
fn every_position_is_distinct() {
    let sets: Vec<_> = ProjectedTexture::ALL.iter().map(|t| switches_for(*t)).collect();
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
