//! [`Query`] collection related to a single [`Property`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{owner, property, Owner, Property},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// Queries [`read::property::Details`] of a [`Property`] by its
/// [`property::Id`].
///
/// Resolves enabled [`property::Image`]s, [`property::Trace`]s (newest first)
/// and the [`Owner`] one after another.
#[derive(Clone, Copy, Debug)]
pub struct Details(pub property::Id);

impl Details {
    /// Creates a new [`Details`] query of the [`Property`] with the provided
    /// [`property::Id`].
    #[must_use]
    pub fn by(id: property::Id) -> Self {
        Self(id)
    }
}

impl<Db> Query<Details> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<property::Image>, property::IdProperty>>,
            Ok = Vec<property::Image>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<property::Trace>, property::IdProperty>>,
            Ok = Vec<property::Trace>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Owner>, owner::IdOwner>>,
            Ok = Option<Owner>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Option<read::property::Details>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Details(id): Details,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(property) = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let images = self
            .database()
            .execute(Select(By::<Vec<property::Image>, _>::new(
                property.id_property.clone(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let traces = self
            .database()
            .execute(Select(By::<Vec<property::Trace>, _>::new(
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

        Ok(Some(read::property::Details {
            property,
            images,
            traces,
            owner,
        }))
    }
}
