//! [`Owner`]-related read definitions.

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::Owner;

/// Total count of stored [`Owner`]s.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct TotalCount(u64);
