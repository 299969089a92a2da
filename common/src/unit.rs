//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing the last modification of an entity.
#[derive(Clone, Copy, Debug)]
pub struct Modification;

/// Marker type describing a birth of a person.
#[derive(Clone, Copy, Debug)]
pub struct Birth;

/// Marker type describing a sale.
#[derive(Clone, Copy, Debug)]
pub struct Sale;
