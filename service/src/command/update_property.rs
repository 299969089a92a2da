//! [`Command`] for replacing an existing [`Property`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{owner, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing all the mutable fields of an existing
/// [`Property`].
///
/// The business [`property::IdProperty`] and the creation date are preserved.
#[derive(Clone, Debug)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub id: property::Id,

    /// New display name of the [`Property`].
    pub name: String,

    /// New postal address of the [`Property`].
    pub address: String,

    /// New asking price of the [`Property`].
    pub price: Decimal,

    /// New internal agency code of the [`Property`].
    pub code_internal: String,

    /// New year the [`Property`] was built.
    pub year: i32,

    /// New business ID of the owner of the [`Property`].
    pub id_owner: owner::IdOwner,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<Update<Property>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProperty,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            id,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PropertyNotExists(id))
            .map_err(tracerr::wrap!())?;

        let property = Property {
            id,
            id_property: existing.id_property,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
            created_at: existing.created_at,
            updated_at: DateTime::now().coerce(),
        };

        let replaced = self
            .database()
            .execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !replaced {
            return Err(tracerr::new!(E::PropertyNotExists(id)));
        }

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Property`] doesn't exist.
    #[display("`Property(id: {_0})` does not exist")]
    #[from(ignore)]
    PropertyNotExists(#[error(not(source))] property::Id),
}
