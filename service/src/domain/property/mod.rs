//! [`Property`] definitions.

pub mod image;
pub mod trace;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::owner;
#[cfg(doc)]
use crate::domain::Owner;

pub use self::{image::Image, trace::Trace};

/// Real estate property listed for sale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// ID of this [`Property`] in the storage.
    pub id: Id,

    /// Business [`IdProperty`] of this [`Property`], referenced by its
    /// [`Image`]s and [`Trace`]s.
    pub id_property: IdProperty,

    /// Display name of this [`Property`].
    pub name: String,

    /// Postal address of this [`Property`].
    pub address: String,

    /// Asking price of this [`Property`].
    pub price: Decimal,

    /// Internal code of this [`Property`] used by the agency.
    pub code_internal: String,

    /// Year this [`Property`] was built.
    pub year: i32,

    /// Business ID of the [`Owner`] of this [`Property`].
    ///
    /// Not enforced by the storage: the [`Owner`] may not exist.
    pub id_owner: owner::IdOwner,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last updated.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Property`] in the storage.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Business ID of a [`Property`].
///
/// Assigned once on creation and never reused.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct IdProperty(String);

impl IdProperty {
    /// Generates a new unique [`IdProperty`].
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for IdProperty {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last updated.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;
