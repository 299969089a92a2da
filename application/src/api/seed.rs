//! Demo fixtures management REST API.
//!
//! Not intended for production deployments.

use axum::{Extension, Json};
use common::Handler as _;
use service::command::{self, seed_sample_data::Outcome};

use crate::{api::Message, AsError as _, Error, Service};

/// Loads demo fixtures unless any data exists already.
///
/// # Errors
///
/// If the storage fails.
#[tracing::instrument(skip_all, fields(rest.name = "seed.seed"))]
pub async fn seed(
    Extension(service): Extension<Service>,
) -> Result<Json<Message>, Error> {
    let outcome = service
        .execute(command::SeedSampleData)
        .await
        .map_err(|e| e.into_error().during("seeding data"))?;

    Ok(Json(Message {
        message: match outcome {
            Outcome::Seeded(_) => "Sample data seeded successfully",
            Outcome::Skipped => "Sample data already exists, seeding skipped",
        },
    }))
}

/// Deletes all the stored data.
///
/// # Errors
///
/// If the storage fails.
#[tracing::instrument(skip_all, fields(rest.name = "seed.clear"))]
pub async fn clear(
    Extension(service): Extension<Service>,
) -> Result<Json<Message>, Error> {
    service
        .execute(command::ClearData)
        .await
        .map_err(|e| e.into_error().during("clearing data"))?;

    Ok(Json(Message {
        message: "Data cleared successfully",
    }))
}
