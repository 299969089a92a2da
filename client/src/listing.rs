//! Property listing page.

use uuid::Uuid;

use crate::{format, Client, PagedResult, Property, PropertyFilter};

/// Number of properties shown on a single page.
pub const PAGE_SIZE: u32 = 12;

/// Number of placeholder cards shown while properties are loading.
pub const PLACEHOLDERS: usize = 8;

/// Message shown when properties fail to load.
pub const FETCH_FAILED: &str = "Failed to fetch properties. Please try again.";

/// Image shown on a card of a property without images.
pub const NO_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// State of the property listing page.
#[derive(Debug)]
pub struct ListingPage {
    /// [`Client`] to fetch properties with.
    client: Client,

    /// Currently applied filter.
    filter: PropertyFilter,

    /// Last successfully fetched page.
    result: PagedResult<Property>,

    /// Indicator whether a fetch is in progress or hasn't happened yet.
    loading: bool,

    /// Message of the last failed fetch.
    error: Option<&'static str>,
}

impl ListingPage {
    /// Creates a new [`ListingPage`] with no properties fetched yet.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            filter: PropertyFilter::default(),
            result: PagedResult::empty(PAGE_SIZE),
            loading: true,
            error: None,
        }
    }

    /// Returns the currently applied [`PropertyFilter`].
    #[must_use]
    pub fn filter(&self) -> &PropertyFilter {
        &self.filter
    }

    /// Fetches properties matching the current filter.
    pub async fn load(&mut self) {
        self.fetch().await;
    }

    /// Applies the provided `filter` starting from its first page.
    pub async fn apply_filter(&mut self, filter: PropertyFilter) {
        self.filter = PropertyFilter {
            page: 1,
            ..filter.normalized()
        };
        self.fetch().await;
    }

    /// Switches to the provided `page` keeping the current filter.
    pub async fn change_page(&mut self, page: u32) {
        self.filter.page = page;
        self.fetch().await;
    }

    /// Refetches properties with the current filter.
    pub async fn retry(&mut self) {
        self.fetch().await;
    }

    /// Resets the filter to its defaults.
    pub async fn clear_filters(&mut self) {
        self.filter = PropertyFilter::default();
        self.fetch().await;
    }

    /// Renders the current state of this [`ListingPage`].
    #[must_use]
    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading {
                placeholders: PLACEHOLDERS,
            };
        }
        if let Some(message) = self.error {
            return View::Failed { message };
        }
        if self.result.items.is_empty() {
            return View::Empty;
        }

        let PagedResult {
            items,
            total_count,
            page,
            total_pages,
            has_next_page,
            has_previous_page,
            ..
        } = &self.result;

        View::Grid {
            summary: format!(
                "Showing {} of {total_count} properties",
                items.len(),
            ),
            page_label: format!("Page {page} of {total_pages}"),
            cards: items.iter().map(Card::new).collect(),
            pagination: Pagination {
                current: *page,
                total: *total_pages,
                has_previous: *has_previous_page,
                has_next: *has_next_page,
            },
        }
    }

    /// Fetches properties matching the current filter, remembering the
    /// failure if any.
    async fn fetch(&mut self) {
        self.loading = true;
        self.error = None;

        match self.client.properties(&self.filter).await {
            Ok(result) => self.result = result,
            Err(e) => {
                tracing::warn!("failed to fetch properties: {e}");
                self.error = Some(FETCH_FAILED);
            }
        }

        self.loading = false;
    }
}

/// Rendered state of a [`ListingPage`].
#[derive(Debug)]
pub enum View<'p> {
    /// Properties are being fetched.
    Loading {
        /// Number of placeholder cards to show.
        placeholders: usize,
    },

    /// Properties failed to be fetched and may be retried.
    Failed {
        /// Message describing the failure.
        message: &'p str,
    },

    /// No property matches the filter.
    Empty,

    /// Page of matching properties.
    Grid {
        /// Number of shown properties out of all the matching ones.
        summary: String,

        /// Position of the shown page.
        page_label: String,

        /// Cards of the shown properties.
        cards: Vec<Card<'p>>,

        /// Pagination controls.
        pagination: Pagination,
    },
}

/// Card of a single property in the grid.
#[derive(Debug)]
pub struct Card<'p> {
    /// Storage ID of the property.
    pub id: Uuid,

    /// Link to the detail page of the property.
    pub link: String,

    /// Cover image of the property.
    pub image: &'p str,

    /// Display name of the property.
    pub name: &'p str,

    /// Year the property was built.
    pub year: i32,

    /// Postal address of the property.
    pub address: &'p str,

    /// Formatted price of the property.
    pub price: String,

    /// Internal agency code badge of the property.
    pub code: String,

    /// Name of the owner of the property, if resolved.
    pub owner: Option<&'p str>,
}

impl<'p> Card<'p> {
    fn new(property: &'p Property) -> Self {
        Self {
            id: property.id,
            link: format!("/properties/{}", property.id),
            image: property.image.as_deref().unwrap_or(NO_IMAGE),
            name: &property.name,
            year: property.year,
            address: &property.address,
            price: format::price(property.price),
            code: format!("#{}", property.code_internal),
            owner: property.owner.as_ref().map(|o| o.name.as_str()),
        }
    }
}

/// Pagination controls of the grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    /// Number of the shown page, starting from `1`.
    pub current: u32,

    /// Total number of pages.
    pub total: u64,

    /// Indicator whether the previous page can be switched to.
    pub has_previous: bool,

    /// Indicator whether the next page can be switched to.
    pub has_next: bool,
}
