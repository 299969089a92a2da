//! [`Command`] for deleting an [`Owner`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{owner, Owner},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Owner`] permanently.
///
/// [`Property`]s referencing the [`Owner`] are left untouched.
///
/// [`Property`]: crate::domain::Property
#[derive(Clone, Copy, Debug)]
pub struct DeleteOwner {
    /// ID of the [`Owner`] to delete.
    pub id: owner::Id,
}

impl<Db> Command<DeleteOwner> for Service<Db>
where
    Db: Database<
        Delete<By<Owner, owner::Id>>,
        Ok = bool,
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteOwner) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteOwner { id } = cmd;

        let deleted = self
            .database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !deleted {
            return Err(tracerr::new!(E::OwnerNotExists(id)));
        }

        Ok(())
    }
}

/// Error of [`DeleteOwner`] [`Command`] execution.
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
