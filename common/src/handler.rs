//! [`Handler`] abstractions.
//!
//! Every layer of the system is expressed as a [`Handler`] of some operation:
//! a database executes `Select`s and `Insert`s, a service executes queries and
//! commands.

use std::future::Future;

/// Executable handler of the `Args` operation.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
