//! Catalogue lookup parameters.

/// Sort order for catalogue lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    /// Newest lists first.
    #[default]
    CreatedDescending,
    /// Oldest lists first.
    CreatedAscending,
    /// Title, lexicographically ascending.
    TitleAscending,
    /// Title, lexicographically descending.
    TitleDescending,
}

/// Filter, sort, and pagination parameters for catalogue lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    favorited: Option<bool>,
    search: Option<String>,
    sort: ListSort,
    page: u32,
    limit: u32,
}

impl ListQuery {
    /// Default page size.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Restricts results to the given favourited state.
    #[must_use]
    pub const fn with_favorited(mut self, favorited: bool) -> Self {
        self.favorited = Some(favorited);
        self
    }

    /// Restricts results to titles containing the given fragment,
    /// case-insensitively.
    #[must_use]
    pub fn with_search(mut self, fragment: impl Into<String>) -> Self {
        self.search = Some(fragment.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: ListSort) -> Self {
        self.sort = sort;
        self
    }

    /// Selects a one-based result page. Zero is normalized to page one.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = if page == 0 { 1 } else { page };
        self
    }

    /// Sets the page size. Zero is normalized to the default limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = if limit == 0 { Self::DEFAULT_LIMIT } else { limit };
        self
    }

    /// Returns the favourited filter, if any.
    #[must_use]
    pub const fn favorited(&self) -> Option<bool> {
        self.favorited
    }

    /// Returns the title search fragment, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the sort order.
    #[must_use]
    pub const fn sort(&self) -> ListSort {
        self.sort
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of records to skip for the selected page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * (self.limit as u64)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            favorited: None,
            search: None,
            sort: ListSort::default(),
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
