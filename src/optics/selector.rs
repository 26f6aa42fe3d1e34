use crate::foundation::error::ProjectorResult;
use crate::graph::node_graph::{
    EmissionColorSource, GroupColorSource, NodeGraph, Switch, SwitchEdge,
};
use crate::settings::model::ProjectedTexture;

/// Switch positions that make `texture` the only source reaching the emission.
///
/// For a bound image the group color is parked on the checker mix so the graph depends only on
/// the selected source, not on the previous one.
pub fn switches_for(texture: ProjectedTexture) -> [Switch; 2] {
    match texture {
        ProjectedTexture::Checker => [
            Switch::GroupColor(GroupColorSource::CheckerMix),
            Switch::EmissionColor(EmissionColorSource::OpticsGroup),
        ],
        ProjectedTexture::ColorGrid => [
            Switch::GroupColor(GroupColorSource::CatalogImage),
            Switch::EmissionColor(EmissionColorSource::OpticsGroup),
        ],
        ProjectedTexture::BoundImage => [
            Switch::GroupColor(GroupColorSource::CheckerMix),
            Switch::EmissionColor(EmissionColorSource::BoundImage),
        ],
    }
}

/// Relink the graph so `texture` feeds the emission.
pub fn select_source(graph: &mut NodeGraph, texture: ProjectedTexture) -> ProjectorResult<()> {
    for switch in switches_for(texture) {
        graph.switch(switch)?;
    }
    Ok(())
}

/// Source currently wired to the emission, read back from the links.
pub fn active_source(graph: &NodeGraph) -> Option<ProjectedTexture> {
    match graph.switch_state(SwitchEdge::EmissionColor)? {
        Switch::EmissionColor(EmissionColorSource::BoundImage) => {
            Some(ProjectedTexture::BoundImage)
        }
        Switch::EmissionColor(EmissionColorSource::OpticsGroup) => {
            match graph.switch_state(SwitchEdge::GroupColor)? {
                Switch::GroupColor(GroupColorSource::CheckerMix) => Some(ProjectedTexture::Checker),
                Switch::GroupColor(GroupColorSource::CatalogImage) => {
                    Some(ProjectedTexture::ColorGrid)
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optics/selector.rs"]
mod tests;
