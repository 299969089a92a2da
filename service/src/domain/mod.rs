//! Domain definitions.

pub mod owner;
pub mod property;

pub use self::{owner::Owner, property::Property};
