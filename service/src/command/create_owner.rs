//! [`Command`] for creating a new [`Owner`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

use crate::{
    domain::{owner, Owner},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Owner`].
///
/// Both the storage [`owner::Id`] and the business [`owner::IdOwner`] are
/// generated by the [`Service`].
#[derive(Clone, Debug)]
pub struct CreateOwner {
    /// Full name of a new [`Owner`].
    pub name: String,

    /// Postal address of a new [`Owner`].
    pub address: String,

    /// Photo URL of a new [`Owner`], if any.
    pub photo: Option<String>,

    /// Birthday of a new [`Owner`].
    pub birthday: owner::BirthDateTime,
}

impl<Db> Command<CreateOwner> for Service<Db>
where
    Db: Database<Insert<Owner>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Owner;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOwner) -> Result<Self::Ok, Self::Err> {
        let CreateOwner {
            name,
            address,
            photo,
            birthday,
        } = cmd;

        let now = DateTime::now();
        let owner = Owner {
            id: owner::Id::new(),
            id_owner: owner::IdOwner::generate(),
            name,
            address,
            photo,
            birthday,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(owner.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        tracing::debug!(id = %owner.id, id_owner = %owner.id_owner, "`Owner` created");

        Ok(owner)
    }
}

/// Error of [`CreateOwner`] [`Command`] execution.
pub type ExecutionError = database::Error;
