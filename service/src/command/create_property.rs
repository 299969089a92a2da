//! [`Command`] for creating a new [`Property`].

use common::{operations::Insert, DateTime};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{owner, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`].
///
/// The referenced [`owner::IdOwner`] isn't checked for existence.
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// Display name of a new [`Property`].
    pub name: String,

    /// Postal address of a new [`Property`].
    pub address: String,

    /// Asking price of a new [`Property`].
    pub price: Decimal,

    /// Internal agency code of a new [`Property`].
    pub code_internal: String,

    /// Year a new [`Property`] was built.
    pub year: i32,

    /// Business ID of the owner of a new [`Property`].
    pub id_owner: owner::IdOwner,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateProperty {
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
        } = cmd;

        let now = DateTime::now();
        let property = Property {
            id: property::Id::new(),
            id_property: property::IdProperty::generate(),
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(property.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        tracing::debug!(
            id = %property.id,
            id_property = %property.id_property,
            "`Property` created",
        );

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;
