//! Pixel-grid overlay switch and resolution constants.

use crate::foundation::error::ProjectorResult;
use crate::graph::node_graph::{NodeGraph, SurfaceSource, Switch, SwitchEdge};

/// Route the light output through the pixel-grid mix (`true`) or straight from the emission.
pub fn set_visible(graph: &mut NodeGraph, visible: bool) -> ProjectorResult<()> {
    let source = if visible {
        SurfaceSource::PixelGrid
    } else {
        SurfaceSource::Emission
    };
    graph.switch(Switch::LightSurface(source))
}

/// Whether the grid is currently wired into the light output.
pub fn is_visible(graph: &NodeGraph) -> bool {
    graph.switch_state(SwitchEdge::LightSurface)
        == Some(Switch::LightSurface(SurfaceSource::PixelGrid))
}

/// Write the grid's pixel counts.
pub fn set_resolution(graph: &mut NodeGraph, width: f64, height: f64) -> ProjectorResult<()> {
    let handles = *graph.handles();
    graph.set_constant(handles.grid_width, width)?;
    graph.set_constant(handles.grid_height, height)
}

/// Current grid pixel counts.
pub fn resolution(graph: &NodeGraph) -> ProjectorResult<(f64, f64)> {
    let handles = graph.handles();
    Ok((
        graph.constant(handles.grid_width)?,
        graph.constant(handles.grid_height)?,
    ))
}
