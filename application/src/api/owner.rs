//! [`Owner`]-related REST API definitions.
//!
//! [`Owner`]: domain::Owner

use axum::{
    extract::{rejection::JsonRejection, Path},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use common::{DateTime, Handler as _};
use serde::{Deserialize, Serialize};
use service::{command, domain, query};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service};

/// Owner of one or more properties.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    /// Storage ID of this owner.
    pub id: Uuid,

    /// Business ID of this owner.
    pub id_owner: String,

    /// Full name of this owner.
    pub name: String,

    /// Postal address of this owner.
    pub address: String,

    /// Photo URL of this owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Birthday of this owner.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub birthday: DateTime,

    /// When this owner was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// When this owner was last updated.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: DateTime,
}

impl From<domain::Owner> for OwnerDto {
    fn from(owner: domain::Owner) -> Self {
        let domain::Owner {
            id,
            id_owner,
            name,
            address,
            photo,
            birthday,
            created_at,
            updated_at,
        } = owner;

        Self {
            id: id.into(),
            id_owner: id_owner.into(),
            name,
            address,
            photo,
            birthday: birthday.coerce(),
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

/// Data of an owner to create or to replace an existing one with.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerInput {
    /// Full name of the owner.
    pub name: String,

    /// Postal address of the owner.
    pub address: String,

    /// Photo URL of the owner.
    #[serde(default)]
    pub photo: Option<String>,

    /// Birthday of the owner, either a date or a date and time.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub birthday: DateTime,
}

impl OwnerInput {
    /// Extracts an [`OwnerInput`] out of the request body.
    fn extract(body: Result<Json<Self>, JsonRejection>) -> Result<Self, Error> {
        body.map(|Json(input)| input).map_err(|e| {
            Error::from(OwnerError::DataRequired).with_cause(&e.body_text())
        })
    }
}

/// Returns an owner by its storage ID.
///
/// # Errors
///
/// See [`OwnerError`].
#[tracing::instrument(skip_all, fields(rest.name = "owners.get"))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<OwnerDto>, Error> {
    let id = api::parse_id(&id, OwnerError::IdRequired, OwnerError::InvalidId)?;

    service
        .execute(query::owner::ById::by(id))
        .await
        .map_err(|e| e.into_error().during("retrieving the owner"))?
        .map(|o| Json(o.into()))
        .ok_or_else(|| OwnerError::NotExists.into())
}

/// Returns an owner by its business ID.
///
/// # Errors
///
/// See [`OwnerError`].
#[tracing::instrument(skip_all, fields(rest.name = "owners.getByIdOwner"))]
pub async fn get_by_id_owner(
    Extension(service): Extension<Service>,
    Path(id_owner): Path<String>,
) -> Result<Json<OwnerDto>, Error> {
    let id_owner = id_owner.trim();
    if id_owner.is_empty() {
        return Err(OwnerError::IdRequired.into());
    }

    service
        .execute(query::owner::ByIdOwner::by(id_owner.into()))
        .await
        .map_err(|e| e.into_error().during("retrieving the owner"))?
        .map(|o| Json(o.into()))
        .ok_or_else(|| OwnerError::NotExists.into())
}

/// Creates a new owner.
///
/// # Errors
///
/// See [`OwnerError`].
#[tracing::instrument(skip_all, fields(rest.name = "owners.create"))]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<OwnerInput>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let OwnerInput {
        name,
        address,
        photo,
        birthday,
    } = OwnerInput::extract(body)?;

    let owner = service
        .execute(command::CreateOwner {
            name,
            address,
            photo,
            birthday: birthday.coerce(),
        })
        .await
        .map_err(|e| e.into_error().during("creating the owner"))?;

    let location = format!("/api/owners/{}", owner.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(OwnerDto::from(owner)),
    ))
}

/// Replaces an existing owner.
///
/// # Errors
///
/// See [`OwnerError`].
#[tracing::instrument(skip_all, fields(rest.name = "owners.update"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<OwnerInput>, JsonRejection>,
) -> Result<Json<OwnerDto>, Error> {
    let id = api::parse_id(&id, OwnerError::IdRequired, OwnerError::InvalidId)?;
    let OwnerInput {
        name,
        address,
        photo,
        birthday,
    } = OwnerInput::extract(body)?;

    service
        .execute(command::UpdateOwner {
            id,
            name,
            address,
            photo,
            birthday: birthday.coerce(),
        })
        .await
        .map(|o| Json(o.into()))
        .map_err(|e| e.into_error().during("updating the owner"))
}

/// Deletes an existing owner.
///
/// # Errors
///
/// See [`OwnerError`].
#[tracing::instrument(skip_all, fields(rest.name = "owners.delete"))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = api::parse_id(&id, OwnerError::IdRequired, OwnerError::InvalidId)?;

    service
        .execute(command::DeleteOwner { id })
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| e.into_error().during("deleting the owner"))
}

impl AsError for command::update_owner::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(OwnerError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_owner::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OwnerNotExists(_) => Some(OwnerError::NotExists.into()),
        }
    }
}

define_error! {
    enum OwnerError {
        #[code = "OWNER_ID_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Owner ID is required"]
        IdRequired,

        #[code = "INVALID_OWNER_ID"]
        #[status = BAD_REQUEST]
        #[message = "Owner ID is invalid"]
        InvalidId,

        #[code = "OWNER_DATA_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Owner data is required"]
        DataRequired,

        #[code = "OWNER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Owner not found"]
        NotExists,
    }
}
