//! REST API definitions.

pub mod owner;
pub mod property;
pub mod seed;

use axum::Json;
use common::pagination;
use serde::Serialize;
use uuid::Uuid;

use crate::Error;

pub use self::{
    owner::OwnerDto,
    property::{PropertyDetailDto, PropertyDto},
};

/// Page of a list returned by the REST API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Items of this page.
    pub items: Vec<T>,

    /// Total number of items matching the request across all pages.
    pub total_count: u64,

    /// Number of this page, starting from `1`.
    pub page: u32,

    /// Requested maximum number of items on a page.
    pub page_size: u32,

    /// Total number of pages.
    pub total_pages: u64,

    /// Indicator whether there is a page after this one.
    pub has_next_page: bool,

    /// Indicator whether there is a page before this one.
    pub has_previous_page: bool,
}

impl<T> From<pagination::Page<T>> for PagedResult<T> {
    fn from(page: pagination::Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            page: page.page(),
            page_size: page.page_size(),
            total_pages: page.total_pages(),
            has_next_page: page.has_next_page(),
            has_previous_page: page.has_previous_page(),
            items: page.items,
        }
    }
}

/// Response carrying a human-readable message only.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Message {
    /// Human-readable message.
    pub message: &'static str,
}

/// Health check response.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Health {
    /// Status of the application.
    pub status: &'static str,
}

/// Reports that the application is up.
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Parses a storage ID out of the raw path segment.
///
/// # Errors
///
/// Errors with `required` if the segment is blank, or with `invalid` if it's
/// not a valid UUID.
pub fn parse_id<Id: From<Uuid>>(
    raw: &str,
    required: impl Into<Error>,
    invalid: impl Into<Error>,
) -> Result<Id, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(required.into());
    }
    Uuid::parse_str(raw)
        .map(Id::from)
        .map_err(|e| invalid.into().with_cause(&e))
}
