//! Projector objects and the scene operations that create, edit and delete them.

pub(crate) mod ops;
pub(crate) mod projector;
