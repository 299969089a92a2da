//! [`Property`]-related read definitions.

use crate::domain::{property, Owner, Property};

/// [`Property`] with all the related entities resolved.
#[derive(Clone, Debug)]
pub struct Details {
    /// The [`Property`] itself.
    pub property: Property,

    /// Enabled [`property::Image`]s of the [`Property`].
    pub images: Vec<property::Image>,

    /// [`property::Trace`]s of the [`Property`], newest sale first.
    pub traces: Vec<property::Trace>,

    /// [`Owner`] of the [`Property`], if it exists.
    pub owner: Option<Owner>,
}

pub mod list {
    //! [`Property`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};
    use rust_decimal::Decimal;

    use crate::domain::{property, Owner, Property};

    define_pagination!(Item, Filter);

    /// Item of a [`Property`] list.
    #[derive(Clone, Debug)]
    pub struct Item {
        /// The listed [`Property`].
        pub property: Property,

        /// Enabled [`property::Image`]s of the [`Property`].
        pub images: Vec<property::Image>,

        /// [`Owner`] of the [`Property`], if it exists.
        pub owner: Option<Owner>,
    }

    impl Item {
        /// Returns the cover [`property::Image`] of this [`Item`], if any.
        #[must_use]
        pub fn cover(&self) -> Option<&property::Image> {
            property::image::cover(&self.images)
        }
    }

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Part of a [`Property`] name to search for, case-insensitively.
        pub name: Option<String>,

        /// Part of a [`Property`] address to search for, case-insensitively.
        pub address: Option<String>,

        /// Inclusive lower bound of a [`Property`] price.
        pub min_price: Option<Decimal>,

        /// Inclusive upper bound of a [`Property`] price.
        pub max_price: Option<Decimal>,
    }

    impl Filter {
        /// Creates a new [`Filter`], treating empty search strings as absent.
        #[must_use]
        pub fn new(
            name: Option<String>,
            address: Option<String>,
            min_price: Option<Decimal>,
            max_price: Option<Decimal>,
        ) -> Self {
            Self {
                name: name.filter(|s| !s.is_empty()),
                address: address.filter(|s| !s.is_empty()),
                min_price,
                max_price,
            }
        }

        /// Checks whether the provided [`Property`] satisfies this [`Filter`].
        #[must_use]
        pub fn matches(&self, property: &Property) -> bool {
            fn contains(haystack: &str, needle: &str) -> bool {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }

            self.name.as_ref().map_or(true, |n| contains(&property.name, n))
                && self
                    .address
                    .as_ref()
                    .map_or(true, |a| contains(&property.address, a))
                && self.min_price.map_or(true, |min| property.price >= min)
                && self.max_price.map_or(true, |max| property.price <= max)
        }
    }

    /// Total count of [`Property`] list items matching a [`Filter`].
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(u64);

    #[cfg(test)]
    mod spec {
        use common::DateTime;
        use rust_decimal::Decimal;

        use crate::domain::{property, Property};

        use super::Filter;

        fn property(name: &str, address: &str, price: i64) -> Property {
            Property {
                id: property::Id::new(),
                id_property: property::IdProperty::generate(),
                name: name.to_owned(),
                address: address.to_owned(),
                price: Decimal::from(price),
                code_internal: "NYC001".to_owned(),
                year: 2020,
                id_owner: "OWNER001".into(),
                created_at: DateTime::now().coerce(),
                updated_at: DateTime::now().coerce(),
            }
        }

        #[test]
        fn empty_strings_are_no_filter() {
            let filter =
                Filter::new(Some(String::new()), Some(String::new()), None, None);
            assert_eq!(filter, Filter::default());
            assert!(filter.matches(&property("Loft", "Chicago", 1)));
        }

        #[test]
        fn matches_substrings_case_insensitively() {
            let loft = property("Contemporary Loft", "150 Industrial Way", 850_000);

            let by_name = Filter::new(Some("LOFT".into()), None, None, None);
            assert!(by_name.matches(&loft));

            let by_address = Filter::new(None, Some("industrial".into()), None, None);
            assert!(by_address.matches(&loft));

            let miss = Filter::new(Some("beach".into()), None, None, None);
            assert!(!miss.matches(&loft));
        }

        #[test]
        fn matches_inclusive_price_bounds() {
            let filter = Filter::new(
                None,
                None,
                Some(Decimal::from(650_000)),
                Some(Decimal::from(850_000)),
            );

            assert!(filter.matches(&property("a", "a", 650_000)));
            assert!(filter.matches(&property("b", "b", 850_000)));
            assert!(!filter.matches(&property("c", "c", 649_999)));
            assert!(!filter.matches(&property("d", "d", 850_001)));
        }

        #[test]
        fn name_search_is_literal() {
            let filter = Filter::new(Some("a.c".into()), None, None, None);
            assert!(!filter.matches(&property("abc", "x", 1)));
            assert!(filter.matches(&property("unit a.c 4", "x", 1)));
        }
    }
}
