//! [`Trace`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

use super::IdProperty;
#[cfg(doc)]
use super::Property;

/// Record in the transaction history of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trace {
    /// ID of this [`Trace`].
    pub id: Id,

    /// Business ID of the [`Property`] this [`Trace`] belongs to.
    pub id_property: IdProperty,

    /// [`DateTime`] of the recorded sale.
    pub date_sale: SaleDateTime,

    /// Description of the recorded transaction.
    pub name: String,

    /// Value of the transaction.
    pub value: Decimal,

    /// Tax paid for the transaction.
    pub tax: Decimal,
}

/// ID of a [`Trace`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Id(String);

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// [`DateTime`] of a sale recorded by a [`Trace`].
pub type SaleDateTime = DateTimeOf<(Trace, unit::Sale)>;

/// Sorts [`Trace`]s from the newest sale to the oldest one.
///
/// Sorting is stable, so [`Trace`]s of the same date keep their order.
pub fn sort_newest_first(traces: &mut [Trace]) {
    traces.sort_by(|a, b| b.date_sale.cmp(&a.date_sale));
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal::Decimal;

    use super::{sort_newest_first, Trace};

    fn trace(id: &str, (y, m, d): (i32, u8, u8)) -> Trace {
        Trace {
            id: id.into(),
            id_property: "PROP001".into(),
            date_sale: DateTime::from_date(y, m, d).unwrap().coerce(),
            name: id.to_owned(),
            value: Decimal::from(100),
            tax: Decimal::from(5),
        }
    }

    #[test]
    fn sorts_newest_first() {
        let mut traces = [
            trace("old", (2020, 1, 1)),
            trace("new", (2023, 9, 30)),
            trace("mid", (2022, 3, 10)),
        ];
        sort_newest_first(&mut traces);

        let ids: Vec<&str> = traces.iter().map(|t| t.id.as_ref()).collect::<Vec<_>>();
        assert_eq!(ids, ["new", "mid", "old"]);
    }
}
