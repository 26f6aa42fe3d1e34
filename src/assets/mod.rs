//! Image resources: the store boundary and the shared resolution catalog images.

pub(crate) mod catalog;
pub(crate) mod store;
