//! [`Command`] for replacing an existing [`Owner`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{owner, Owner},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for replacing all the mutable fields of an existing [`Owner`].
///
/// The business [`owner::IdOwner`] and the creation date are preserved. No
/// version check is performed, so concurrent updates are last-write-wins.
#[derive(Clone, Debug)]
pub struct UpdateOwner {
    /// ID of the [`Owner`] to update.
    pub id: owner::Id,

    /// New full name of the [`Owner`].
    pub name: String,

    /// New postal address of the [`Owner`].
    pub address: String,

    /// New photo URL of the [`Owner`].
    pub photo: Option<String>,

    /// New birthday of the [`Owner`].
    pub birthday: owner::BirthDateTime,
}

impl<Db> Command<UpdateOwner> for Service<Db>
where
    Db: Database<
            Select<By<Option<Owner>, owner::Id>>,
            Ok = Option<Owner>,
            Err = Traced<database::Error>,
        > + Database<Update<Owner>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = Owner;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateOwner) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOwner {
            id,
            name,
            address,
            photo,
            birthday,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::<Option<Owner>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OwnerNotExists(id))
            .map_err(tracerr::wrap!())?;

        let owner = Owner {
            id,
            id_owner: existing.id_owner,
            name,
            address,
            photo,
            birthday,
            created_at: existing.created_at,
            updated_at: DateTime::now().coerce(),
        };

        let replaced = self
            .database()
            .execute(Update(owner.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !replaced {
            return Err(tracerr::new!(E::OwnerNotExists(id)));
        }

        Ok(owner)
    }
}

/// Error of [`UpdateOwner`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Owner`] doesn't exist.
    #[display("`Owner(id: {_0})` does not exist")]
    #[from(ignore)]
    OwnerNotExists(#[error(not(source))] owner::Id),
}
