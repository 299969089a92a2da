//! Postgres [`Database`] implementation.

pub mod connection;
mod impls;
mod like_pattern;

use deadpool_postgres::Runtime;
use derive_more::{Display, Error as StdError, From};
use tokio_postgres::NoTls;
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use refinery::embed_migrations;

pub use self::{connection::Connection, like_pattern::LikePattern};

pub use deadpool_postgres::{Config, PoolConfig, Timeouts};

/// Postgres [`Database`] client.
///
/// Every operation is executed on its own [`connection::Client`] taken from
/// the [`connection::Pool`], so no operation spans a transaction.
#[derive(Clone, Debug)]
pub struct Postgres {
    /// [`connection::Pool`] of [`connection::Client`]s.
    pool: connection::Pool,
}

impl Postgres {
    /// Creates a new [`Postgres`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to create a new [`Postgres`] client.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let pool = conf
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { pool })
    }

    /// Takes a [`connection::Client`] from the [`connection::Pool`].
    ///
    /// # Errors
    ///
    /// If the [`connection::Pool`] failed to provide a [`connection::Client`].
    pub async fn client(
        &self,
    ) -> Result<connection::Client, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

/// Postgres database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// [`Connection`] error.
    #[display("`Connection` error: {_0}")]
    Connection(connection::Error),

    /// Error of creating a new [`connection::Pool`] client.
    #[display("Failed to create a new `connection::Pool`: {_0}")]
    PoolCreationError(connection::PoolCreationError),

    /// [`connection::Pool`] error.
    #[display("`connection::Pool` error: {_0}")]
    PoolError(connection::PoolError),

    /// Migration error.
    #[display("Failed to apply migrations: {_0}")]
    Migration(refinery::Error),
}
