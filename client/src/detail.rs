//! Property detail page.

use uuid::Uuid;

use crate::{format, Client, PropertyDetail};

/// Message shown when a property fails to load.
pub const FETCH_FAILED: &str =
    "Failed to fetch property details. Please try again.";

/// Image shown in the gallery of a property without images.
pub const NO_IMAGE: &str = "https://via.placeholder.com/800x600?text=No+Image";

/// State of the property detail page.
#[derive(Debug)]
pub struct DetailPage {
    /// Fetched property, if any.
    property: Option<PropertyDetail>,

    /// Indicator whether the property is being fetched.
    loading: bool,

    /// Message of the failed fetch.
    error: Option<&'static str>,

    /// Index of the image shown in the gallery.
    selected: usize,
}

impl Default for DetailPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPage {
    /// Creates a new [`DetailPage`] waiting for its property.
    #[must_use]
    pub fn new() -> Self {
        Self {
            property: None,
            loading: true,
            error: None,
            selected: 0,
        }
    }

    /// Fetches the property with the provided `id`.
    ///
    /// A missing property is not a failure and results in
    /// [`View::NotFound`].
    pub async fn load(&mut self, client: &Client, id: Uuid) {
        self.loading = true;
        self.error = None;
        self.selected = 0;

        match client.property(id).await {
            Ok(property) => self.property = Some(property),
            Err(e) if e.is_not_found() => self.property = None,
            Err(e) => {
                tracing::warn!("failed to fetch property `{id}`: {e}");
                self.property = None;
                self.error = Some(FETCH_FAILED);
            }
        }

        self.loading = false;
    }

    /// Shows the gallery image at the provided `index`, if there is one.
    pub fn select(&mut self, index: usize) {
        if index < self.images().len() {
            self.selected = index;
        }
    }

    /// Shows the next gallery image, wrapping to the first one.
    pub fn next(&mut self) {
        let count = self.images().len();
        self.selected = (self.selected + 1) % count;
    }

    /// Shows the previous gallery image, wrapping to the last one.
    pub fn previous(&mut self) {
        let count = self.images().len();
        self.selected = (self.selected + count - 1) % count;
    }

    /// Renders the current state of this [`DetailPage`].
    #[must_use]
    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }
        if let Some(message) = self.error {
            return View::Failed { message };
        }
        let Some(detail) = &self.property else {
            return View::NotFound;
        };
        let property = &detail.property;

        let images = self.images();
        View::Loaded(Detail {
            name: &property.name,
            code: format!("#{}", property.code_internal),
            address: &property.address,
            price: format::price(property.price),
            year: property.year,
            gallery: Gallery {
                show_controls: images.len() > 1,
                selected: images[self.selected],
                images,
            },
            history: detail
                .traces
                .iter()
                .map(|t| HistoryEntry {
                    name: &t.name,
                    date: format::date(t.date_sale),
                    value: format::price(t.value),
                    tax: format!("Tax: {}", format::price(t.tax)),
                })
                .collect(),
            owner: property.owner.as_ref().map(|o| OwnerPanel {
                name: &o.name,
                id_owner: format!("ID: {}", o.id_owner),
                address: &o.address,
                born: format!("Born: {}", format::date(o.birthday)),
            }),
        })
    }

    /// Returns the files of the gallery images, never empty.
    fn images(&self) -> Vec<&str> {
        let images = self
            .property
            .iter()
            .flat_map(|p| &p.images)
            .map(|i| i.file.as_str())
            .collect::<Vec<_>>();
        if images.is_empty() {
            vec![NO_IMAGE]
        } else {
            images
        }
    }
}

/// Rendered state of a [`DetailPage`].
#[derive(Debug)]
pub enum View<'p> {
    /// Property is being fetched.
    Loading,

    /// Property failed to be fetched.
    Failed {
        /// Message describing the failure.
        message: &'p str,
    },

    /// Property doesn't exist.
    NotFound,

    /// Property is fetched.
    Loaded(Detail<'p>),
}

/// Rendered property.
#[derive(Debug)]
pub struct Detail<'p> {
    /// Display name of the property.
    pub name: &'p str,

    /// Internal agency code badge of the property.
    pub code: String,

    /// Postal address of the property.
    pub address: &'p str,

    /// Formatted price of the property.
    pub price: String,

    /// Year the property was built.
    pub year: i32,

    /// Image gallery of the property.
    pub gallery: Gallery<'p>,

    /// Transaction history of the property, newest sale first.
    pub history: Vec<HistoryEntry<'p>>,

    /// Owner of the property, if resolved.
    pub owner: Option<OwnerPanel<'p>>,
}

/// Image gallery of a property.
#[derive(Debug)]
pub struct Gallery<'p> {
    /// Files of all the images.
    pub images: Vec<&'p str>,

    /// File of the shown image.
    pub selected: &'p str,

    /// Indicator whether image selection controls are shown.
    pub show_controls: bool,
}

/// Entry of the transaction history.
#[derive(Debug)]
pub struct HistoryEntry<'p> {
    /// Description of the transaction.
    pub name: &'p str,

    /// Formatted sale date.
    pub date: String,

    /// Formatted value of the transaction.
    pub value: String,

    /// Formatted tax paid for the transaction.
    pub tax: String,
}

/// Owner information panel.
#[derive(Debug)]
pub struct OwnerPanel<'p> {
    /// Full name of the owner.
    pub name: &'p str,

    /// Business ID label of the owner.
    pub id_owner: String,

    /// Postal address of the owner.
    pub address: &'p str,

    /// Birthday label of the owner.
    pub born: String,
}

#[cfg(test)]
mod spec {
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::Client;

    use super::{DetailPage, View, FETCH_FAILED, NO_IMAGE};

    const ID: &str = "5d0c2a8e-1f3b-4c6d-9e7f-0a1b2c3d4e5f";

    async fn loaded(images: &[&str]) -> DetailPage {
        let server = MockServer::start().await;
        let images = images
            .iter()
            .enumerate()
            .map(|(i, f)| {
                json!({"id": format!("IMG{i}"), "file": f, "enabled": true})
            })
            .collect::<Vec<_>>();
        Mock::given(method("GET"))
            .and(path(format!("/api/properties/{ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": ID,
                "idProperty": "PROP006",
                "idOwner": "OWNER002",
                "name": "Penthouse Suite",
                "address": "888 Skyline Boulevard, Seattle, WA 98101",
                "price": 4_500_000.0,
                "codeInternal": "SEA001",
                "year": 2021,
                "owner": {
                    "id": "0a6e9c1e-2b55-4d5e-9a77-8f1c2d3e4b5a",
                    "idOwner": "OWNER002",
                    "name": "Sarah Johnson",
                    "address": "456 Oak Avenue, Los Angeles, CA 90210",
                    "birthday": "1975-08-22T00:00:00Z",
                    "createdAt": "2024-01-01T00:00:00Z",
                    "updatedAt": "2024-01-01T00:00:00Z",
                },
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z",
                "images": images,
                "traces": [{
                    "id": "TRACE006",
                    "dateSale": "2023-09-30T00:00:00Z",
                    "name": "Luxury Purchase",
                    "value": 4_500_000.0,
                    "tax": 225_000.0,
                }],
            })))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri()).unwrap();
        let mut page = DetailPage::new();
        page.load(&client, ID.parse().unwrap()).await;
        page
    }

    #[tokio::test]
    async fn renders_property_panels() {
        let page = loaded(&["1.png", "2.png", "3.png"]).await;

        let View::Loaded(detail) = page.view() else {
            panic!("expected loaded property");
        };
        assert_eq!(detail.name, "Penthouse Suite");
        assert_eq!(detail.code, "#SEA001");
        assert_eq!(detail.price, "$4,500,000.00");
        assert_eq!(detail.history.len(), 1);
        assert_eq!(detail.history[0].date, "September 30, 2023");
        assert_eq!(detail.history[0].tax, "Tax: $225,000.00");
        let owner = detail.owner.unwrap();
        assert_eq!(owner.id_owner, "ID: OWNER002");
        assert_eq!(owner.born, "Born: August 22, 1975");
        assert!(detail.gallery.show_controls);
        assert_eq!(detail.gallery.selected, "1.png");
    }

    #[tokio::test]
    async fn wraps_gallery_navigation() {
        let mut page = loaded(&["1.png", "2.png", "3.png"]).await;
        let selected = |page: &DetailPage| match page.view() {
            View::Loaded(d) => d.gallery.selected.to_owned(),
            View::Loading | View::Failed { .. } | View::NotFound => {
                panic!("expected loaded property")
            }
        };

        page.previous();
        assert_eq!(selected(&page), "3.png");
        page.next();
        assert_eq!(selected(&page), "1.png");
        page.select(1);
        assert_eq!(selected(&page), "2.png");
        page.select(7);
        assert_eq!(selected(&page), "2.png");
    }

    #[tokio::test]
    async fn falls_back_to_placeholder_image() {
        let mut page = loaded(&[]).await;
        page.next();

        let View::Loaded(detail) = page.view() else {
            panic!("expected loaded property");
        };
        assert_eq!(detail.gallery.images, vec![NO_IMAGE]);
        assert_eq!(detail.gallery.selected, NO_IMAGE);
        assert!(!detail.gallery.show_controls);
    }

    #[tokio::test]
    async fn distinguishes_missing_from_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/properties/{}", Uuid::nil())))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Property not found"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = Client::new(&server.uri()).unwrap();

        let mut page = DetailPage::new();
        assert!(matches!(page.view(), View::Loading));

        page.load(&client, Uuid::nil()).await;
        assert!(matches!(page.view(), View::NotFound));

        page.load(&client, ID.parse().unwrap()).await;
        assert!(matches!(
            page.view(),
            View::Failed { message } if message == FETCH_FAILED,
        ));
    }
}
