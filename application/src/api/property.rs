//! [`Property`]-related REST API definitions.
//!
//! [`Property`]: domain::Property

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use common::{pagination, DateTime, Handler as _};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use service::{
    command, domain, query,
    read::{self, property::list},
};
use uuid::Uuid;

use crate::{api, config, define_error, AsError, Error, Service};

/// Property listed for sale.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    /// Storage ID of this property.
    pub id: Uuid,

    /// Business ID of this property.
    pub id_property: String,

    /// Business ID of the owner of this property.
    pub id_owner: String,

    /// Display name of this property.
    pub name: String,

    /// Postal address of this property.
    pub address: String,

    /// Asking price of this property.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// File URL of the cover image of this property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Internal agency code of this property.
    pub code_internal: String,

    /// Year this property was built.
    pub year: i32,

    /// Owner of this property, if resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<api::OwnerDto>,

    /// When this property was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// When this property was last updated.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: DateTime,
}

impl PropertyDto {
    /// Builds a new [`PropertyDto`] out of the provided [`domain::Property`]
    /// and its related entities.
    fn new(
        property: domain::Property,
        cover: Option<&domain::property::Image>,
        owner: Option<domain::Owner>,
    ) -> Self {
        let domain::Property {
            id,
            id_property,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
            created_at,
            updated_at,
        } = property;

        Self {
            id: id.into(),
            id_property: id_property.into(),
            id_owner: id_owner.into(),
            name,
            address,
            price,
            image: cover.map(|i| i.file.clone()),
            code_internal,
            year,
            owner: owner.map(Into::into),
            created_at: created_at.coerce(),
            updated_at: updated_at.coerce(),
        }
    }
}

impl From<domain::Property> for PropertyDto {
    fn from(property: domain::Property) -> Self {
        Self::new(property, None, None)
    }
}

impl From<list::Item> for PropertyDto {
    fn from(item: list::Item) -> Self {
        let cover = item.cover().cloned();
        let list::Item {
            property,
            images: _,
            owner,
        } = item;
        Self::new(property, cover.as_ref(), owner)
    }
}

/// Property with its images and transaction history.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetailDto {
    /// Property itself.
    #[serde(flatten)]
    pub property: PropertyDto,

    /// Enabled images of the property.
    pub images: Vec<PropertyImageDto>,

    /// Transaction history of the property, newest sale first.
    pub traces: Vec<PropertyTraceDto>,
}

impl From<read::property::Details> for PropertyDetailDto {
    fn from(details: read::property::Details) -> Self {
        let read::property::Details {
            property,
            images,
            traces,
            owner,
        } = details;

        Self {
            property: PropertyDto::new(
                property,
                domain::property::image::cover(&images),
                owner,
            ),
            images: images.into_iter().map(Into::into).collect(),
            traces: traces.into_iter().map(Into::into).collect(),
        }
    }
}

/// Image of a property.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImageDto {
    /// ID of this image.
    pub id: String,

    /// File URL of this image.
    pub file: String,

    /// Indicator whether this image is shown to clients.
    pub enabled: bool,
}

impl From<domain::property::Image> for PropertyImageDto {
    fn from(image: domain::property::Image) -> Self {
        Self {
            id: image.id.into(),
            file: image.file,
            enabled: image.enabled,
        }
    }
}

/// Record in the transaction history of a property.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTraceDto {
    /// ID of this record.
    pub id: String,

    /// When the sale happened.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub date_sale: DateTime,

    /// Description of the transaction.
    pub name: String,

    /// Value of the transaction.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// Tax paid for the transaction.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

impl From<domain::property::Trace> for PropertyTraceDto {
    fn from(trace: domain::property::Trace) -> Self {
        let domain::property::Trace {
            id,
            id_property: _,
            date_sale,
            name,
            value,
            tax,
        } = trace;

        Self {
            id: id.into(),
            date_sale: date_sale.coerce(),
            name,
            value,
            tax,
        }
    }
}

/// Data of a property to create or to replace an existing one with.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    /// Display name of the property.
    pub name: String,

    /// Postal address of the property.
    pub address: String,

    /// Asking price of the property.
    pub price: Decimal,

    /// Internal agency code of the property.
    #[serde(default)]
    pub code_internal: String,

    /// Year the property was built.
    #[serde(default)]
    pub year: i32,

    /// Business ID of the owner of the property.
    pub id_owner: String,
}

impl PropertyInput {
    /// Extracts a [`PropertyInput`] out of the request body.
    fn extract(body: Result<Json<Self>, JsonRejection>) -> Result<Self, Error> {
        body.map(|Json(input)| input).map_err(|e| {
            Error::from(PropertyError::DataRequired).with_cause(&e.body_text())
        })
    }
}

/// Query parameters of a property list request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    /// Part of the name to search for.
    pub name: Option<String>,

    /// Part of the address to search for.
    pub address: Option<String>,

    /// Inclusive lower bound of the price.
    #[serde(deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,

    /// Inclusive upper bound of the price.
    #[serde(deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,

    /// Number of the requested page, starting from `1`.
    pub page: Option<u32>,

    /// Maximum number of items on the requested page.
    pub page_size: Option<u32>,
}

/// Deserializes an optional [`Decimal`] query parameter, treating a blank
/// value as an absent one.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| raw.trim().parse::<Decimal>().map_err(de::Error::custom))
        .transpose()
}

/// Returns a page of properties matching the provided filter.
///
/// # Errors
///
/// If the query parameters are malformed or the storage fails.
#[tracing::instrument(skip_all, fields(rest.name = "properties.list"))]
pub async fn list(
    Extension(service): Extension<Service>,
    Extension(conf): Extension<config::Api>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<api::PagedResult<PropertyDto>>, Error> {
    let Query(ListParams {
        name,
        address,
        min_price,
        max_price,
        page,
        page_size,
    }) = params.map_err(AsError::into_error)?;

    let arguments = pagination::Arguments::new(
        page.unwrap_or(1),
        page_size.unwrap_or(conf.default_page_size),
        conf.max_page_size,
    )
    .map_err(AsError::into_error)?;
    let filter = list::Filter::new(name, address, min_price, max_price);

    service
        .execute(query::properties::List::by(list::Selector {
            arguments,
            filter,
        }))
        .await
        .map(|page| Json(page.map(PropertyDto::from).into()))
        .map_err(|e| e.into_error().during("retrieving properties"))
}

/// Returns a property with its images, history and owner.
///
/// # Errors
///
/// See [`PropertyError`].
#[tracing::instrument(skip_all, fields(rest.name = "properties.get"))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<PropertyDetailDto>, Error> {
    let id = api::parse_id(
        &id,
        PropertyError::IdRequired,
        PropertyError::InvalidId,
    )?;

    service
        .execute(query::property::Details::by(id))
        .await
        .map_err(|e| e.into_error().during("retrieving the property"))?
        .map(|d| Json(d.into()))
        .ok_or_else(|| PropertyError::NotExists.into())
}

/// Creates a new property.
///
/// # Errors
///
/// See [`PropertyError`].
#[tracing::instrument(skip_all, fields(rest.name = "properties.create"))]
pub async fn create(
    Extension(service): Extension<Service>,
    body: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let PropertyInput {
        name,
        address,
        price,
        code_internal,
        year,
        id_owner,
    } = PropertyInput::extract(body)?;

    let property = service
        .execute(command::CreateProperty {
            name,
            address,
            price,
            code_internal,
            year,
            id_owner: id_owner.into(),
        })
        .await
        .map_err(|e| e.into_error().during("creating the property"))?;

    let location = format!("/api/properties/{}", property.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PropertyDto::from(property)),
    ))
}

/// Replaces an existing property.
///
/// # Errors
///
/// See [`PropertyError`].
#[tracing::instrument(skip_all, fields(rest.name = "properties.update"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<Json<PropertyDto>, Error> {
    let id = api::parse_id(
        &id,
        PropertyError::IdRequired,
        PropertyError::InvalidId,
    )?;
    let PropertyInput {
        name,
        address,
        price,
        code_internal,
        year,
        id_owner,
    } = PropertyInput::extract(body)?;

    service
        .execute(command::UpdateProperty {
            id,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner: id_owner.into(),
        })
        .await
        .map(|p| Json(p.into()))
        .map_err(|e| e.into_error().during("updating the property"))
}

/// Deletes an existing property.
///
/// # Errors
///
/// See [`PropertyError`].
#[tracing::instrument(skip_all, fields(rest.name = "properties.delete"))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = api::parse_id(
        &id,
        PropertyError::IdRequired,
        PropertyError::InvalidId,
    )?;

    service
        .execute(command::DeleteProperty { id })
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|e| e.into_error().during("deleting the property"))
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_ID_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Property ID is required"]
        IdRequired,

        #[code = "INVALID_PROPERTY_ID"]
        #[status = BAD_REQUEST]
        #[message = "Property ID is invalid"]
        InvalidId,

        #[code = "PROPERTY_DATA_REQUIRED"]
        #[status = BAD_REQUEST]
        #[message = "Property data is required"]
        DataRequired,

        #[code = "PROPERTY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Property not found"]
        NotExists,
    }
}
