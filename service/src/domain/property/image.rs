//! [`Image`] definitions.

use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use super::IdProperty;
#[cfg(doc)]
use super::Property;

/// Photo of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
    /// ID of this [`Image`].
    pub id: Id,

    /// Business ID of the [`Property`] this [`Image`] belongs to.
    pub id_property: IdProperty,

    /// URL of the image file.
    pub file: String,

    /// Indicator whether this [`Image`] may be shown to clients.
    pub enabled: bool,
}

/// ID of an [`Image`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Id(String);

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Picks the cover [`Image`] of a [`Property`]: the first enabled one.
#[must_use]
pub fn cover<'i>(images: impl IntoIterator<Item = &'i Image>) -> Option<&'i Image> {
    images.into_iter().find(|i| i.enabled)
}

#[cfg(test)]
mod spec {
    use super::{cover, Image};

    fn image(id: &str, enabled: bool) -> Image {
        Image {
            id: id.into(),
            id_property: "PROP001".into(),
            file: format!("https://img.example/{id}.jpg"),
            enabled,
        }
    }

    #[test]
    fn cover_is_first_enabled_image() {
        let images = [image("a", false), image("b", true), image("c", true)];
        assert_eq!(cover(&images).map(|i| i.id.as_ref()), Some("b"));
    }

    #[test]
    fn no_cover_without_enabled_images() {
        assert!(cover(&[image("a", false)]).is_none());
        assert!(cover(&[]).is_none());
    }
}
