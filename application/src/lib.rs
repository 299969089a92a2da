//! Application provides REST API for interacting with the [`Service`].
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
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

pub mod api;
pub mod args;
pub mod config;
pub mod error;

use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
// Used in binary.
use axum_client_ip as _;
use futures as _;
#[cfg(feature = "postgres")]
use refinery as _;
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Storage>;

/// Builds the [`Router`] serving the REST API on top of the provided
/// [`Service`].
pub fn router(service: Service, conf: config::Api) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/api/properties",
            get(api::property::list).post(api::property::create),
        )
        .route(
            "/api/properties/:id",
            get(api::property::get)
                .put(api::property::update)
                .delete(api::property::delete),
        )
        .route("/api/owners", post(api::owner::create))
        .route(
            "/api/owners/:id",
            get(api::owner::get)
                .put(api::owner::update)
                .delete(api::owner::delete),
        )
        .route(
            "/api/owners/by-id-owner/:id_owner",
            get(api::owner::get_by_id_owner),
        )
        .route("/api/seed/seed", post(api::seed::seed))
        .route("/api/seed/clear", delete(api::seed::clear))
        .layer(Extension(service))
        .layer(Extension(conf))
}

#[cfg(test)]
mod spec {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use service::infra::Memory;
    use tower::ServiceExt as _;

    use super::{config, router, Service};

    fn app() -> Router {
        router(
            Service::new(Memory::new().into()),
            config::Api::default(),
        )
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, http::HeaderMap, Value) {
        let req = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => req
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    fn property(name: &str, price: u32) -> Value {
        json!({
            "name": name,
            "address": "1 Test Street",
            "price": price,
            "codeInternal": "TST001",
            "year": 2001,
            "idOwner": "OWNER001",
        })
    }

    #[tokio::test]
    async fn reports_health() {
        let app = app();

        let (status, _, body) = call(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn creates_and_fetches_property() {
        let app = app();

        let (status, headers, created) = call(
            &app,
            Method::POST,
            "/api/properties",
            Some(property("Garden Cottage", 450_000)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_owned();
        assert_eq!(
            headers[header::LOCATION],
            format!("/api/properties/{id}").as_str(),
        );
        assert!(created["idProperty"].as_str().is_some_and(|s| !s.is_empty()));
        assert_eq!(created["price"], json!(450_000.0));

        let (status, _, details) =
            call(&app, Method::GET, &format!("/api/properties/{id}"), None)
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["name"], "Garden Cottage");
        assert_eq!(details["codeInternal"], "TST001");
        assert_eq!(details["images"], json!([]));
        assert_eq!(details["traces"], json!([]));
    }

    #[tokio::test]
    async fn rejects_malformed_and_unknown_ids() {
        let app = app();

        let (status, _, body) =
            call(&app, Method::GET, "/api/properties/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Property ID is invalid");

        let (status, _, body) = call(
            &app,
            Method::GET,
            "/api/properties/9b2f3c9e-4f5a-4c1e-8a55-1e2d3c4b5a69",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Property not found");

        let (status, _, body) = call(
            &app,
            Method::DELETE,
            "/api/owners/9b2f3c9e-4f5a-4c1e-8a55-1e2d3c4b5a69",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Owner not found");
    }

    #[tokio::test]
    async fn requires_request_body() {
        let app = app();

        let (status, _, body) =
            call(&app, Method::POST, "/api/properties", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Property data is required");
        assert!(body["error"].is_string());

        let (status, _, body) = call(
            &app,
            Method::POST,
            "/api/owners",
            Some(json!({"name": "No Birthday"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Owner data is required");
    }

    #[tokio::test]
    async fn rejects_birthday_out_of_range() {
        let app = app();

        for birthday in [
            "9999-12-31T23:00:00-05:00",
            "0000-01-01T00:00:00+01:00",
        ] {
            let (status, _, body) = call(
                &app,
                Method::POST,
                "/api/owners",
                Some(json!({
                    "name": "Far Future",
                    "address": "1 Edge Street",
                    "birthday": birthday,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "for `{birthday}`");
            assert_eq!(body["message"], "Owner data is required");
        }

        // Seeding proceeds only when no owner is stored.
        let (_, _, body) =
            call(&app, Method::POST, "/api/seed/seed", None).await;
        assert_eq!(body["message"], "Sample data seeded successfully");
    }

    #[tokio::test]
    async fn paginates_filtered_list() {
        let app = app();
        for (name, price) in [
            ("Alpha Villa", 100_000),
            ("Beta Villa", 200_000),
            ("Gamma Villa", 300_000),
            ("Delta Flat", 400_000),
        ] {
            let (status, _, _) = call(
                &app,
                Method::POST,
                "/api/properties",
                Some(property(name, price)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _, page) = call(
            &app,
            Method::GET,
            "/api/properties?name=villa&page=2&pageSize=2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalCount"], 3);
        assert_eq!(page["page"], 2);
        assert_eq!(page["pageSize"], 2);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["hasNextPage"], false);
        assert_eq!(page["hasPreviousPage"], true);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
        assert!(page["items"][0]["name"]
            .as_str()
            .is_some_and(|n| n.ends_with("Villa")));

        let (status, _, page) = call(
            &app,
            Method::GET,
            "/api/properties?minPrice=150000&maxPrice=300000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalCount"], 2);
        assert_eq!(page["pageSize"], 10);

        let (status, _, page) = call(
            &app,
            Method::GET,
            "/api/properties?minPrice=&maxPrice=",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalCount"], 4);

        let (status, _, _) =
            call(&app, Method::GET, "/api/properties?page=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _, _) =
            call(&app, Method::GET, "/api/properties?minPrice=cheap", None)
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn seeds_and_clears_sample_data() {
        let app = app();

        let (status, _, body) =
            call(&app, Method::POST, "/api/seed/seed", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Sample data seeded successfully");

        let (_, _, body) =
            call(&app, Method::POST, "/api/seed/seed", None).await;
        assert_eq!(
            body["message"],
            "Sample data already exists, seeding skipped",
        );

        let (status, _, page) =
            call(&app, Method::GET, "/api/properties?pageSize=4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalCount"], 6);
        assert_eq!(page["totalPages"], 2);
        let first = &page["items"][0];
        assert_eq!(first["name"], "Luxury Downtown Apartment");
        assert_eq!(first["owner"]["name"], "John Smith");
        assert!(first["image"].as_str().is_some_and(|i| i.contains("Luxury")));

        let (status, _, owner) = call(
            &app,
            Method::GET,
            "/api/owners/by-id-owner/OWNER002",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(owner["name"], "Sarah Johnson");
        assert_eq!(owner["birthday"], "1975-08-22T00:00:00Z");

        let (status, _, body) =
            call(&app, Method::DELETE, "/api/seed/clear", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Data cleared successfully");

        let (_, _, page) =
            call(&app, Method::GET, "/api/properties", None).await;
        assert_eq!(page["totalCount"], 0);
        assert_eq!(page["items"], json!([]));
    }

    #[tokio::test]
    async fn updates_and_deletes_owner() {
        let app = app();

        let (status, _, created) = call(
            &app,
            Method::POST,
            "/api/owners",
            Some(json!({
                "name": "Jane Roe",
                "address": "5 Side Street",
                "birthday": "1988-02-14",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/api/owners/{}", created["id"].as_str().unwrap());

        let (status, _, updated) = call(
            &app,
            Method::PUT,
            &uri,
            Some(json!({
                "name": "Jane Doe",
                "address": "5 Side Street",
                "photo": "https://example.com/jane.png",
                "birthday": "1988-02-14T00:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Jane Doe");
        assert_eq!(updated["idOwner"], created["idOwner"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, _, body) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _, _) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
