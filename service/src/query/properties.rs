//! [`Query`] collection related to the multiple [`Property`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{owner, property, Owner, Property},
    infra::{database, Database},
    read::property::list,
    Service,
};

use super::Query;

/// Queries a [`list::Page`] of [`Property`] items matching a [`list::Filter`].
///
/// Every item is enriched with its enabled [`property::Image`]s and its
/// [`Owner`], resolved sequentially item by item.
#[derive(Clone, Debug)]
pub struct List(pub list::Selector);

impl List {
    /// Creates a new [`List`] query with the provided [`list::Selector`].
    #[must_use]
    pub fn by(selector: list::Selector) -> Self {
        Self(selector)
    }
}

impl<Db> Query<List> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Property>, list::Selector>>,
            Ok = Vec<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<list::TotalCount, list::Filter>>,
            Ok = list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<property::Image>, property::IdProperty>>,
            Ok = Vec<property::Image>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Owner>, owner::IdOwner>>,
            Ok = Option<Owner>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        List(selector): List,
    ) -> Result<Self::Ok, Self::Err> {
        let arguments = selector.arguments;

        let total_count = self
            .database()
            .execute(Select(By::<list::TotalCount, _>::new(
                selector.filter.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let properties = self
            .database()
            .execute(Select(By::<Vec<Property>, _>::new(selector)))
            .await
            .map_err(tracerr::wrap!())?;

        let mut items = Vec::with_capacity(properties.len());
        for property in properties {
            let images = self
                .database()
                .execute(Select(By::<Vec<property::Image>, _>::new(
                    property.id_property.clone(),
                )))
                .await
                .map_err(tracerr::wrap!())?;
            let owner = self
                .database()
                .execute(Select(By::<Option<Owner>, _>::new(
                    property.id_owner.clone(),
                )))
                .await
                .map_err(tracerr::wrap!())?;
            items.push(list::Item {
                property,
                images,
                owner,
            });
        }

        Ok(list::Page::new(arguments, items, total_count.into()))
    }
}
