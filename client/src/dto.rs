//! Request and response bodies of the REST API.

use common::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use uuid::Uuid;

/// Property listed for sale.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
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
    #[serde(default)]
    pub image: Option<String>,

    /// Internal agency code of this property.
    pub code_internal: String,

    /// Year this property was built.
    pub year: i32,

    /// Owner of this property, if resolved.
    #[serde(default)]
    pub owner: Option<Owner>,

    /// When this property was created.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub created_at: DateTime,

    /// When this property was last updated.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub updated_at: DateTime,
}

/// [`Property`] with its images and transaction history.
#[derive(Clone, Debug, Deserialize)]
pub struct PropertyDetail {
    /// Property itself.
    #[serde(flatten)]
    pub property: Property,

    /// Enabled images of the property.
    pub images: Vec<PropertyImage>,

    /// Transaction history of the property, newest sale first.
    pub traces: Vec<PropertyTrace>,
}

/// Image of a [`Property`].
#[derive(Clone, Debug, Deserialize)]
pub struct PropertyImage {
    /// ID of this image.
    pub id: String,

    /// File URL of this image.
    pub file: String,

    /// Indicator whether this image is shown to clients.
    pub enabled: bool,
}

/// Record in the transaction history of a [`Property`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTrace {
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

/// Owner of one or more properties.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Storage ID of this owner.
    pub id: Uuid,

    /// Business ID of this owner.
    pub id_owner: String,

    /// Full name of this owner.
    pub name: String,

    /// Postal address of this owner.
    pub address: String,

    /// Photo URL of this owner.
    #[serde(default)]
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

/// Page of a list.
#[derive(Clone, Debug, Deserialize)]
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

impl<T> PagedResult<T> {
    /// Creates a new empty [`PagedResult`] of the provided `page_size`.
    #[must_use]
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: vec![],
            total_count: 0,
            page: 1,
            page_size,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }
}

/// Filter and pagination of a property list request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Part of the name to search for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Part of the address to search for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Inclusive lower bound of the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,

    /// Inclusive upper bound of the price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,

    /// Number of the requested page, starting from `1`.
    #[default(1)]
    pub page: u32,

    /// Maximum number of items on the requested page.
    #[default(crate::listing::PAGE_SIZE)]
    pub page_size: u32,
}

impl PropertyFilter {
    /// Drops blank text criteria of this [`PropertyFilter`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for text in [&mut self.name, &mut self.address] {
            if text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                *text = None;
            }
        }
        self
    }
}

/// Data of a property to create or to replace an existing one with.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    /// Display name of the property.
    pub name: String,

    /// Postal address of the property.
    pub address: String,

    /// Asking price of the property.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Internal agency code of the property.
    pub code_internal: String,

    /// Year the property was built.
    pub year: i32,

    /// Business ID of the owner of the property.
    pub id_owner: String,
}

/// Data of an owner to create or to replace an existing one with.
#[derive(Clone, Debug, Serialize)]
pub struct OwnerInput {
    /// Full name of the owner.
    pub name: String,

    /// Postal address of the owner.
    pub address: String,

    /// Photo URL of the owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Birthday of the owner.
    #[serde(with = "common::datetime::serde::rfc3339")]
    pub birthday: DateTime,
}

/// Response carrying a human-readable message only.
#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    /// Human-readable message.
    pub message: String,
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{PropertyDetail, PropertyFilter};

    #[test]
    fn reads_flattened_detail() {
        let detail: PropertyDetail = serde_json::from_str(
            r#"{
                "id": "5d0c2a8e-1f3b-4c6d-9e7f-0a1b2c3d4e5f",
                "idProperty": "PROP001",
                "idOwner": "OWNER001",
                "name": "Luxury Downtown Apartment",
                "address": "100 Central Park West, New York, NY 10023",
                "price": 2500000.0,
                "image": "https://via.placeholder.com/800x600?text=Luxury+Apartment+1",
                "codeInternal": "NYC001",
                "year": 2020,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z",
                "images": [{"id": "IMG001", "file": "a.png", "enabled": true}],
                "traces": [{
                    "id": "TRACE001",
                    "dateSale": "2023-06-15T00:00:00Z",
                    "name": "Initial Purchase",
                    "value": 2500000.0,
                    "tax": 125000.0
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(detail.property.price, Decimal::from(2_500_000));
        assert_eq!(detail.property.code_internal, "NYC001");
        assert!(detail.property.owner.is_none());
        assert_eq!(detail.images.len(), 1);
        assert_eq!(detail.traces[0].tax, Decimal::from(125_000));
    }

    #[test]
    fn omits_blank_criteria() {
        let filter = PropertyFilter {
            name: Some("  ".into()),
            address: Some("Ocean".into()),
            ..PropertyFilter::default()
        }
        .normalized();

        assert_eq!(filter.name, None);
        assert_eq!(filter.address.as_deref(), Some("Ocean"));
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"address": "Ocean", "page": 1, "pageSize": 12}),
        );
    }
}
