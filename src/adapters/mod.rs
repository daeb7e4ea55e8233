//! External system adapters

pub mod doaj;
pub mod store;
