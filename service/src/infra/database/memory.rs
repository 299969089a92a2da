//! In-memory [`Database`] implementation.

use std::sync::Arc;

use common::operations::{All, By, Delete, Insert, Select, Update};
use tokio::sync::RwLock;
use tracerr::Traced;

use crate::{
    domain::{owner, property, Owner, Property},
    infra::database,
    read,
};

use super::Database;

/// In-memory [`Database`] keeping all the data in the process.
///
/// Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<RwLock<Tables>>);

/// Data stored by a [`Memory`] [`Database`], in insertion order.
#[derive(Debug, Default)]
struct Tables {
    /// Stored [`Owner`]s.
    owners: Vec<Owner>,

    /// Stored [`Property`]s.
    properties: Vec<Property>,

    /// Stored [`property::Image`]s.
    images: Vec<property::Image>,

    /// Stored [`property::Trace`]s.
    traces: Vec<property::Trace>,
}

impl Memory {
    /// Creates a new empty [`Memory`] [`Database`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database<Select<By<Option<Owner>, owner::Id>>> for Memory {
    type Ok = Option<Owner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Owner>, owner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let tables = self.0.read().await;
        Ok(tables.owners.iter().find(|o| o.id == id).cloned())
    }
}

impl Database<Select<By<Option<Owner>, owner::IdOwner>>> for Memory {
    type Ok = Option<Owner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Owner>, owner::IdOwner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.0.read().await;
        Ok(tables
            .owners
            .iter()
            .find(|o| &o.id_owner == by.inner())
            .cloned())
    }
}

impl Database<Select<By<read::owner::TotalCount, All>>> for Memory {
    type Ok = read::owner::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::owner::TotalCount, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.0.read().await;
        Ok(count(tables.owners.len()).into())
    }
}

impl Database<Insert<Owner>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(owner): Insert<Owner>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.owners.push(owner);
        Ok(())
    }
}

impl Database<Update<Owner>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(owner): Update<Owner>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut tables = self.0.write().await;
        Ok(replace(&mut tables.owners, owner, |o| o.id))
    }
}

impl Database<Delete<By<Owner, owner::Id>>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Owner, owner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut tables = self.0.write().await;
        Ok(remove(&mut tables.owners, |o| o.id == id))
    }
}

impl Database<Delete<By<Owner, All>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<Owner, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.owners.clear();
        Ok(())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let tables = self.0.read().await;
        Ok(tables.properties.iter().find(|p| p.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Property>, read::property::list::Selector>>>
    for Memory
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::property::list::Selector { arguments, filter } =
            by.into_inner();

        let tables = self.0.read().await;
        let mut found = tables
            .properties
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let skip = usize::try_from(arguments.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(arguments.limit()).unwrap_or(usize::MAX);
        Ok(found.into_iter().skip(skip).take(limit).collect())
    }
}

impl Database<Select<By<read::property::list::TotalCount, read::property::list::Filter>>>
    for Memory
{
    type Ok = read::property::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::property::list::TotalCount, read::property::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let tables = self.0.read().await;
        let found = tables.properties.iter().filter(|p| filter.matches(p));
        Ok(count(found.count()).into())
    }
}

impl Database<Insert<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.properties.push(property);
        Ok(())
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut tables = self.0.write().await;
        Ok(replace(&mut tables.properties, property, |p| p.id))
    }
}

impl Database<Delete<By<Property, property::Id>>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut tables = self.0.write().await;
        Ok(remove(&mut tables.properties, |p| p.id == id))
    }
}

impl Database<Delete<By<Property, All>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<Property, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.properties.clear();
        Ok(())
    }
}

impl Database<Select<By<Vec<property::Image>, property::IdProperty>>>
    for Memory
{
    type Ok = Vec<property::Image>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<property::Image>, property::IdProperty>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.0.read().await;
        Ok(tables
            .images
            .iter()
            .filter(|i| i.enabled && &i.id_property == by.inner())
            .cloned()
            .collect())
    }
}

impl Database<Insert<property::Image>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(image): Insert<property::Image>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.images.push(image);
        Ok(())
    }
}

impl Database<Delete<By<property::Image, All>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<property::Image, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.images.clear();
        Ok(())
    }
}

impl Database<Select<By<Vec<property::Trace>, property::IdProperty>>>
    for Memory
{
    type Ok = Vec<property::Trace>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<property::Trace>, property::IdProperty>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tables = self.0.read().await;
        let mut traces = tables
            .traces
            .iter()
            .filter(|t| &t.id_property == by.inner())
            .cloned()
            .collect::<Vec<_>>();
        property::trace::sort_newest_first(&mut traces);
        Ok(traces)
    }
}

impl Database<Insert<property::Trace>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(trace): Insert<property::Trace>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.traces.push(trace);
        Ok(())
    }
}

impl Database<Delete<By<property::Trace, All>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<property::Trace, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.write().await.traces.clear();
        Ok(())
    }
}

/// Converts a collection length into a stored count.
fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Replaces the row having the same key as the provided `row`.
///
/// Returns `false` if there is no such row.
fn replace<T, K: PartialEq>(rows: &mut [T], row: T, key: impl Fn(&T) -> K) -> bool {
    let k = key(&row);
    rows.iter_mut().find(|r| key(&**r) == k).map_or(false, |r| {
        *r = row;
        true
    })
}

/// Removes the rows matching the provided `predicate`.
///
/// Returns `false` if nothing was removed.
fn remove<T>(rows: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|r| !predicate(r));
    rows.len() != before
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{All, By, Delete, Insert, Select, Update},
        pagination, DateTime,
    };
    use rust_decimal::Decimal;

    use crate::{
        domain::{property, Property},
        read::property::list,
    };

    use super::{Database as _, Memory};

    fn property(name: &str, price: i64) -> Property {
        Property {
            id: property::Id::new(),
            id_property: property::IdProperty::generate(),
            name: name.to_owned(),
            address: "1 Test Street".to_owned(),
            price: Decimal::from(price),
            code_internal: "TST001".to_owned(),
            year: 2000,
            id_owner: "OWNER001".into(),
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn image(id: &str, id_property: &property::IdProperty, enabled: bool) -> property::Image {
        property::Image {
            id: id.into(),
            id_property: id_property.clone(),
            file: format!("https://img.example/{id}.jpg"),
            enabled,
        }
    }

    #[tokio::test]
    async fn pages_in_creation_order() {
        let db = Memory::new();
        let mut names = Vec::new();
        for n in 0..5 {
            let mut p = property(&format!("House {n}"), 100);
            p.created_at = DateTime::from_date(2020, 1, n + 1).unwrap().coerce();
            names.push(p.name.clone());
            db.execute(Insert(p)).await.unwrap();
        }

        let selector = list::Selector {
            arguments: pagination::Arguments::new(2, 2, 100).unwrap(),
            filter: list::Filter::default(),
        };
        let page = db
            .execute(Select(By::<Vec<Property>, _>::new(selector)))
            .await
            .unwrap();

        let got = page.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(got, [names[2].as_str(), names[3].as_str()]);
    }

    #[tokio::test]
    async fn counts_only_matching() {
        let db = Memory::new();
        for (name, price) in [("Loft", 100), ("Villa", 500), ("Cabin", 50)] {
            db.execute(Insert(property(name, price))).await.unwrap();
        }

        let filter =
            list::Filter::new(None, None, Some(Decimal::from(100)), None);
        let total: u64 = db
            .execute(Select(By::<list::TotalCount, _>::new(filter)))
            .await
            .unwrap()
            .into();

        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn selects_only_enabled_images_in_insertion_order() {
        let db = Memory::new();
        let p = property("Loft", 100);
        for (id, enabled) in [("b", true), ("a", false), ("c", true)] {
            db.execute(Insert(image(id, &p.id_property, enabled)))
                .await
                .unwrap();
        }
        db.execute(Insert(image("x", &"OTHER".into(), true)))
            .await
            .unwrap();

        let images = db
            .execute(Select(By::<Vec<property::Image>, _>::new(
                p.id_property.clone(),
            )))
            .await
            .unwrap();

        let ids: Vec<&str> = images.iter().map(|i| i.id.as_ref()).collect::<Vec<_>>();
        assert_eq!(ids, ["b", "c"]);
    }

    #[tokio::test]
    async fn reports_missing_rows_on_update_and_delete() {
        let db = Memory::new();
        let p = property("Loft", 100);

        assert!(!db.execute(Update(p.clone())).await.unwrap());
        assert!(!db
            .execute(Delete(By::<Property, _>::new(p.id)))
            .await
            .unwrap());

        db.execute(Insert(p.clone())).await.unwrap();
        assert!(db.execute(Update(p.clone())).await.unwrap());
        assert!(db
            .execute(Delete(By::<Property, _>::new(p.id)))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn clears_everything() {
        let db = Memory::new();
        db.execute(Insert(property("Loft", 100))).await.unwrap();
        db.execute(Delete(By::<Property, _>::new(All))).await.unwrap();

        let total: u64 = db
            .execute(Select(By::<list::TotalCount, _>::new(
                list::Filter::default(),
            )))
            .await
            .unwrap()
            .into();
        assert_eq!(total, 0);
    }
}
