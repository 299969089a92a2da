//! [`Database`]-related implementations.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;
#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}

/// [`Database`] backend selected at startup.
#[derive(Clone, Debug, From)]
pub enum Storage {
    /// In-process [`Memory`] storage.
    Memory(Memory),

    /// [`Postgres`] storage.
    #[cfg(feature = "postgres")]
    Postgres(Postgres),
}

#[cfg(feature = "postgres")]
impl<Op> Database<Op> for Storage
where
    Memory: Database<Op>,
    Postgres: Database<
        Op,
        Ok = <Memory as Database<Op>>::Ok,
        Err = <Memory as Database<Op>>::Err,
    >,
{
    type Ok = <Memory as Database<Op>>::Ok;
    type Err = <Memory as Database<Op>>::Err;

    async fn execute(&self, op: Op) -> Result<Self::Ok, Self::Err> {
        match self {
            Self::Memory(db) => db.execute(op).await,
            Self::Postgres(db) => db.execute(op).await,
        }
    }
}

#[cfg(not(feature = "postgres"))]
impl<Op> Database<Op> for Storage
where
    Memory: Database<Op>,
{
    type Ok = <Memory as Database<Op>>::Ok;
    type Err = <Memory as Database<Op>>::Err;

    async fn execute(&self, op: Op) -> Result<Self::Ok, Self::Err> {
        let Self::Memory(db) = self;
        db.execute(op).await
    }
}
