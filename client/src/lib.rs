//! Typed client of the property listing REST API, along with headless view
//! models of the listing and detail pages built on top of it.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod detail;
pub mod dto;
pub mod format;
pub mod listing;

use derive_more::{Display, From};
use reqwest::{Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;

pub use self::{
    detail::DetailPage,
    dto::{
        Message, Owner, OwnerInput, PagedResult, Property, PropertyDetail,
        PropertyFilter, PropertyInput,
    },
    listing::ListingPage,
};

/// Client of the property listing REST API.
#[derive(Clone, Debug)]
pub struct Client {
    /// Underlying HTTP client.
    http: reqwest::Client,

    /// Root URL of the REST API server.
    base: Url,
}

impl Client {
    /// Creates a new [`Client`] of the server at the provided root URL.
    ///
    /// # Errors
    ///
    /// If the URL is malformed or cannot have a path.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base = Url::parse(base_url).map_err(|e| {
            Error::InvalidBaseUrl(format!("`{base_url}`: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(format!(
                "`{base_url}` cannot have a path",
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Checks that the server is up.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> Result<(), Error> {
        let resp = self.http.get(self.endpoint(&["health"])).send().await?;
        _ = ensure_success(resp).await?;
        Ok(())
    }

    /// Fetches a page of properties matching the provided filter.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn properties(
        &self,
        filter: &PropertyFilter,
    ) -> Result<PagedResult<Property>, Error> {
        let resp = self
            .http
            .get(self.endpoint(&["api", "properties"]))
            .query(filter)
            .send()
            .await?;
        receive(resp).await
    }

    /// Fetches a property with its images, history and owner.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn property(&self, id: Uuid) -> Result<PropertyDetail, Error> {
        let id = id.to_string();
        let resp = self
            .http
            .get(self.endpoint(&["api", "properties", &id]))
            .send()
            .await?;
        receive(resp).await
    }

    /// Creates a new property.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn create_property(
        &self,
        input: &PropertyInput,
    ) -> Result<Property, Error> {
        let resp = self
            .http
            .post(self.endpoint(&["api", "properties"]))
            .json(input)
            .send()
            .await?;
        receive(resp).await
    }

    /// Replaces an existing property.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn update_property(
        &self,
        id: Uuid,
        input: &PropertyInput,
    ) -> Result<Property, Error> {
        let id = id.to_string();
        let resp = self
            .http
            .put(self.endpoint(&["api", "properties", &id]))
            .json(input)
            .send()
            .await?;
        receive(resp).await
    }

    /// Deletes an existing property.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_property(&self, id: Uuid) -> Result<(), Error> {
        let id = id.to_string();
        let resp = self
            .http
            .delete(self.endpoint(&["api", "properties", &id]))
            .send()
            .await?;
        _ = ensure_success(resp).await?;
        Ok(())
    }

    /// Fetches an owner by its storage ID.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn owner(&self, id: Uuid) -> Result<Owner, Error> {
        let id = id.to_string();
        let resp = self
            .http
            .get(self.endpoint(&["api", "owners", &id]))
            .send()
            .await?;
        receive(resp).await
    }

    /// Fetches an owner by its business ID.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn owner_by_id_owner(
        &self,
        id_owner: &str,
    ) -> Result<Owner, Error> {
        let resp = self
            .http
            .get(self.endpoint(&["api", "owners", "by-id-owner", id_owner]))
            .send()
            .await?;
        receive(resp).await
    }

    /// Creates a new owner.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn create_owner(
        &self,
        input: &OwnerInput,
    ) -> Result<Owner, Error> {
        let resp = self
            .http
            .post(self.endpoint(&["api", "owners"]))
            .json(input)
            .send()
            .await?;
        receive(resp).await
    }

    /// Replaces an existing owner.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn update_owner(
        &self,
        id: Uuid,
        input: &OwnerInput,
    ) -> Result<Owner, Error> {
        let id = id.to_string();
        let resp = self
            .http
            .put(self.endpoint(&["api", "owners", &id]))
            .json(input)
            .send()
            .await?;
        receive(resp).await
    }

    /// Deletes an existing owner.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn delete_owner(&self, id: Uuid) -> Result<(), Error> {
        let id = id.to_string();
        let resp = self
            .http
            .delete(self.endpoint(&["api", "owners", &id]))
            .send()
            .await?;
        _ = ensure_success(resp).await?;
        Ok(())
    }

    /// Loads demo fixtures into the server, unless it has data already.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn seed(&self) -> Result<Message, Error> {
        let resp = self
            .http
            .post(self.endpoint(&["api", "seed", "seed"]))
            .send()
            .await?;
        receive(resp).await
    }

    /// Deletes all the data stored on the server.
    ///
    /// # Errors
    ///
    /// See [`Error`].
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<Message, Error> {
        let resp = self
            .http
            .delete(self.endpoint(&["api", "seed", "clear"]))
            .send()
            .await?;
        receive(resp).await
    }

    /// Builds the URL of the endpoint at the provided path `segments`.
    ///
    /// Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            _ = path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Error of a [`Client`] request.
#[derive(Debug, Display, derive_more::Error, From)]
pub enum Error {
    /// Provided root URL cannot be used.
    #[display("invalid base URL {_0}")]
    #[from(ignore)]
    InvalidBaseUrl(#[error(not(source))] String),

    /// Request failed to be sent or its response failed to be read.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Server responded with a non-success status.
    #[display("server responded with {status}: {message}")]
    #[from(ignore)]
    Status {
        /// Status of the response.
        status: StatusCode,

        /// Message reported by the server.
        message: String,
    },
}

impl Error {
    /// Indicates whether the requested resource doesn't exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. } if *status == StatusCode::NOT_FOUND,
        )
    }
}

/// JSON body of an error response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Human-readable message.
    message: String,
}

/// Reads the JSON body of a successful [`Response`].
async fn receive<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    Ok(ensure_success(resp).await?.json().await?)
}

/// Converts a non-success [`Response`] into an [`Error::Status`].
async fn ensure_success(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.json::<ErrorBody>().await.map_or_else(
        |_| status.canonical_reason().unwrap_or("Request failed").to_owned(),
        |body| body.message,
    );
    tracing::debug!("request failed with {status}: {message}");
    Err(Error::Status { status, message })
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::{
        matchers::{body_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::{Client, Error, OwnerInput, PropertyFilter};

    fn owner_json(id_owner: &str, name: &str) -> serde_json::Value {
        json!({
            "id": "0a6e9c1e-2b55-4d5e-9a77-8f1c2d3e4b5a",
            "idOwner": id_owner,
            "name": name,
            "address": "123 Main Street, New York, NY 10001",
            "birthday": "1980-05-15T00:00:00Z",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(Error::InvalidBaseUrl(_)),
        ));
        assert!(matches!(
            Client::new("mailto:agency@example.com"),
            Err(Error::InvalidBaseUrl(_)),
        ));
    }

    #[tokio::test]
    async fn sends_filter_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/properties"))
            .and(query_param("name", "loft"))
            .and(query_param("page", "2"))
            .and(query_param("pageSize", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
                "totalCount": 13,
                "page": 2,
                "pageSize": 12,
                "totalPages": 2,
                "hasNextPage": false,
                "hasPreviousPage": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let page = client
            .properties(&PropertyFilter {
                name: Some("loft".into()),
                page: 2,
                ..PropertyFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 13);
        assert!(page.has_previous_page);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn encodes_path_segments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/owners/by-id-owner/OWNER%2F001"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(owner_json("OWNER/001", "John Smith")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let owner = client.owner_by_id_owner("OWNER/001").await.unwrap();

        assert_eq!(owner.id_owner, "OWNER/001");
        assert_eq!(owner.name, "John Smith");
        assert_eq!(owner.photo, None);
    }

    #[tokio::test]
    async fn surfaces_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Property not found"})),
            )
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let err = client.delete_property(Uuid::nil()).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(
            &err,
            Error::Status { message, .. } if message == "Property not found",
        ));
    }

    #[tokio::test]
    async fn falls_back_to_status_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let err = client.health().await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(
            &err,
            Error::Status { message, .. } if message == "Bad Gateway",
        ));
    }

    #[tokio::test]
    async fn posts_owner_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/owners"))
            .and(body_json(json!({
                "name": "John Smith",
                "address": "123 Main St",
                "birthday": "1980-05-15T00:00:00Z",
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(owner_json("7f1c", "John Smith")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let owner = client
            .create_owner(&OwnerInput {
                name: "John Smith".into(),
                address: "123 Main St".into(),
                photo: None,
                birthday: common::DateTime::from_date(1980, 5, 15).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(owner.id_owner, "7f1c");
    }
}
