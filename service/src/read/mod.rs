//! Read entities definitions.

pub mod owner;
pub mod property;
