//! Parameter model: settings fields, their domains and recompute triggers.

pub(crate) mod catalog;
pub(crate) mod fields;
pub(crate) mod model;
