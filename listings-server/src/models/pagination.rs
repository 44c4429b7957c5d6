//! Pagination and filtering for listing queries

use super::listing::Listing;

/// Skip/limit window over the ordered listing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page; `None` returns every remaining listing
    pub per_page: Option<u32>,
}

impl Pagination {
    /// Create a window, clamping `page` to at least 1.
    ///
    /// A `per_page` of zero means "no limit".
    pub fn new(page: u32, per_page: Option<u32>) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.filter(|n| *n > 0),
        }
    }

    /// Number of listings to skip.
    ///
    /// Without a page size every page starts at the beginning.
    pub fn offset(&self) -> u64 {
        match self.per_page {
            Some(per_page) => u64::from(self.page.saturating_sub(1)) * u64::from(per_page),
            None => 0,
        }
    }

    /// Maximum number of listings to return.
    pub fn limit(&self) -> Option<u32> {
        self.per_page
    }

    /// Apply the window to an already ordered sequence.
    pub fn apply<I>(&self, items: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = Listing>,
    {
        let skipped = items
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX));
        match self.limit() {
            Some(limit) => skipped.take(limit as usize).collect(),
            None => skipped.collect(),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
        }
    }
}

/// Everything `getAllListings` needs: the window and an optional name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub page: Pagination,
    /// Case-insensitive substring of the listing `name`
    pub name: Option<String>,
}

impl ListingFilter {
    /// Whether a listing passes the name filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        match &self.name {
            None => true,
            Some(needle) => listing
                .name()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase())),
        }
    }
}

/// Raw query string for `GET /api/listings`.
///
/// Values stay strings so non-numeric input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingsQuery {
    pub page: Option<String>,
    /// `perPage` on the wire
    pub per_page: Option<String>,
    pub name: Option<String>,
}

impl ListingsQuery {
    /// Collect decoded `key=value` pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "perPage" => &mut query.per_page,
                "name" => &mut query.name,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

impl From<ListingsQuery> for ListingFilter {
    fn from(query: ListingsQuery) -> Self {
        let page = Pagination::new(
            parse_positive(query.page.as_deref()).unwrap_or(1),
            parse_positive(query.per_page.as_deref()),
        );
        let name = query.name.filter(|n| !n.is_empty());
        Self { page, name }
    }
}
