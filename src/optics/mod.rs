//! Projector optics: resolution resolver, update propagator, source selector and grid overlay.

pub mod overlay;
pub(crate) mod propagate;
pub(crate) mod resolve;
pub(crate) mod selector;
