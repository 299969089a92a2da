//! Abstractions for offset pagination.

use derive_more::{Display, Error};

/// Pagination arguments selecting a single page of a list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Number of the requested page, starting from `1`.
    page: u32,

    /// Maximum number of items on a page.
    page_size: u32,
}

impl Arguments {
    /// Creates new [`Arguments`] checking them against the provided
    /// `max_page_size`.
    ///
    /// # Errors
    ///
    /// Errors if `page` is zero, or `page_size` is zero or exceeds the
    /// `max_page_size`.
    pub fn new(
        page: u32,
        page_size: u32,
        max_page_size: u32,
    ) -> Result<Self, ArgumentsError> {
        if page == 0 {
            return Err(ArgumentsError::ZeroPage);
        }
        if page_size == 0 || page_size > max_page_size {
            return Err(ArgumentsError::PageSizeOutOfRange {
                max: max_page_size,
            });
        }
        Ok(Self { page, page_size })
    }

    /// Returns the number of the requested page, starting from `1`.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the maximum number of items on the requested page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of items to skip before the requested page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Returns the maximum number of items to take for the requested page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Error of constructing [`Arguments`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ArgumentsError {
    /// Pages are numbered from `1`.
    #[display("`page` must be greater than or equal to 1")]
    ZeroPage,

    /// Page size is zero or too big.
    #[display("`pageSize` must be between 1 and {max}")]
    PageSizeOutOfRange {
        /// Maximum allowed page size.
        max: u32,
    },
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// A single page of a list.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Total number of items matching the filter, across all pages.
    pub total_count: u64,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,
}

impl<T> Page<T> {
    /// Creates a new [`Page`] out of the provided items.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = T>,
        total_count: u64,
    ) -> Self {
        Self {
            items: items.into_iter().collect(),
            total_count,
            arguments,
        }
    }

    /// Returns the number of this [`Page`], starting from `1`.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.arguments.page()
    }

    /// Returns the requested size of this [`Page`].
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.arguments.page_size()
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.arguments.limit())
    }

    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page()) < self.total_pages()
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page() > 1
    }

    /// Maps items of this [`Page`] preserving its metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            arguments: self.arguments,
        }
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of list items."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, ArgumentsError, Page};

    #[test]
    fn computes_skip_and_limit() {
        let args = Arguments::new(1, 10, 100).unwrap();
        assert_eq!((args.skip(), args.limit()), (0, 10));

        let args = Arguments::new(3, 12, 100).unwrap();
        assert_eq!((args.skip(), args.limit()), (24, 12));
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(Arguments::new(0, 10, 100), Err(ArgumentsError::ZeroPage));
        assert_eq!(
            Arguments::new(1, 0, 100),
            Err(ArgumentsError::PageSizeOutOfRange { max: 100 }),
        );
        assert_eq!(
            Arguments::new(1, 101, 100),
            Err(ArgumentsError::PageSizeOutOfRange { max: 100 }),
        );
        assert!(Arguments::new(1, 100, 100).is_ok());
    }

    #[test]
    fn derives_page_metadata() {
        let page = Page::new(Arguments::new(1, 4, 100).unwrap(), [1, 2, 3, 4], 6);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next_page());
        assert!(!page.has_previous_page());

        let page = Page::new(Arguments::new(2, 4, 100).unwrap(), [5, 6], 6);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next_page());
        assert!(page.has_previous_page());

        let page = Page::<u8>::new(Arguments::new(1, 4, 100).unwrap(), [], 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next_page());
        assert!(!page.has_previous_page());
    }

    #[test]
    fn beyond_last_page_is_empty_but_keeps_totals() {
        let page = Page::<u8>::new(Arguments::new(5, 4, 100).unwrap(), [], 6);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[test]
    fn maps_items_preserving_metadata() {
        let page = Page::new(Arguments::new(2, 2, 100).unwrap(), [1, 2], 5)
            .map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.page(), 2);
        assert_eq!(page.page_size(), 2);
    }
}
