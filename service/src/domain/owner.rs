//! [`Owner`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

/// Owner of one or more [`Property`]s.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Owner {
    /// ID of this [`Owner`] in the storage.
    pub id: Id,

    /// Business [`IdOwner`] of this [`Owner`], referenced by [`Property`]s.
    ///
    /// [`Property`]: crate::domain::Property
    pub id_owner: IdOwner,

    /// Full name of this [`Owner`].
    pub name: String,

    /// Postal address of this [`Owner`].
    pub address: String,

    /// URL of this [`Owner`]'s photo, if any.
    pub photo: Option<String>,

    /// [`DateTime`] when this [`Owner`] was born.
    pub birthday: BirthDateTime,

    /// [`DateTime`] when this [`Owner`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Owner`] was last updated.
    pub updated_at: ModificationDateTime,
}

/// ID of an [`Owner`] in the storage.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
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

/// Business ID of an [`Owner`].
///
/// Assigned once on creation and never reused.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct IdOwner(String);

impl IdOwner {
    /// Generates a new unique [`IdOwner`].
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for IdOwner {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// [`DateTime`] when an [`Owner`] was born.
pub type BirthDateTime = DateTimeOf<(Owner, unit::Birth)>;

/// [`DateTime`] when an [`Owner`] was created.
pub type CreationDateTime = DateTimeOf<(Owner, unit::Creation)>;

/// [`DateTime`] when an [`Owner`] was last updated.
pub type ModificationDateTime = DateTimeOf<(Owner, unit::Modification)>;
