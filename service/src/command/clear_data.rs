//! [`Command`] for wiping all the stored data.

use common::operations::{All, By, Delete};
use tracerr::Traced;

use crate::{
    domain::{property, Owner, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting every [`Owner`], [`Property`], and their images
/// and traces.
///
/// Dependents are deleted before the entities they reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearData;

impl<Db> Command<ClearData> for Service<Db>
where
    Db: Database<
            Delete<By<property::Trace, All>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<property::Image, All>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Property, All>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Delete<By<Owner, All>>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: ClearData) -> Result<Self::Ok, Self::Err> {
        tracing::info!("clearing all data");

        self.database()
            .execute(Delete(By::<property::Trace, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?;
        self.database()
            .execute(Delete(By::<property::Image, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?;
        self.database()
            .execute(Delete(By::<Property, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?;
        self.database()
            .execute(Delete(By::<Owner, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?;

        tracing::info!("all data cleared");

        Ok(())
    }
}

/// Error of [`ClearData`] [`Command`] execution.
pub type ExecutionError = database::Error;
