//! URL templates for listing and deal-tab pages, and resolution of the
//! relative links found on them.
//!
//! ## Listing templates
//!
//! ```text
//! All Stores + All Categories   {base}/?page={n}
//! store      + All Categories   {base}/store/{store}?page={n}
//! All Stores + category         {base}/category/{category}?page={n}
//! store      + category         {base}/category/{category}?store={store}&page={n}
//! ```
//!
//! Deal tabs live at `{base}/{tab}` and are not paginated.

use dealhunter_core::{CategoryFilter, DealTab, Listing, StoreFilter};
use reqwest::Url;

use crate::error::ScraperError;

/// The site being scraped, identified by its base URL.
#[derive(Debug, Clone)]
pub struct Site {
    /// Base URL with a trailing slash, so `join` resolves against the root.
    base: Url,
    /// Base URL without a trailing slash, used by the templates.
    root: String,
}

impl Site {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse
    /// or is not `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ScraperError> {
        let root = base_url.trim().trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{root}/")).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", base.scheme()),
            });
        }

        Ok(Self { base, root })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// URL of page `page` of a listing.
    #[must_use]
    pub fn listing_url(&self, listing: Listing, page: u32) -> String {
        let root = &self.root;
        match (listing.store, listing.category) {
            (StoreFilter::All, CategoryFilter::All) => format!("{root}/?page={page}"),
            (StoreFilter::Only(store), CategoryFilter::All) => {
                format!("{root}/store/{}?page={page}", store.slug())
            }
            (StoreFilter::All, CategoryFilter::Only(category)) => {
                format!("{root}/category/{}?page={page}", category.slug())
            }
            (StoreFilter::Only(store), CategoryFilter::Only(category)) => format!(
                "{root}/category/{}?store={}&page={page}",
                category.slug(),
                store.slug()
            ),
        }
    }

    #[must_use]
    pub fn deal_tab_url(&self, tab: DealTab) -> String {
        format!("{}/{}", self.root, tab.slug())
    }

    /// Resolves an `href`/`src` value against the base URL.
    ///
    /// Absolute URLs come back unchanged. A value that cannot be joined is
    /// returned trimmed as-is.
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        let href = href.trim();
        match self.base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(href, error = %e, "could not resolve URL against base");
                href.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use dealhunter_core::{Category, Store};

    use super::*;

    fn site() -> Site {
        Site::new("https://dealsheaven.in").unwrap()
    }

    #[test]
    fn store_scoped_url_for_all_categories() {
        let listing = Listing::new(StoreFilter::Only(Store::Amazon), CategoryFilter::All);
        assert_eq!(
            site().listing_url(listing, 2),
            "https://dealsheaven.in/store/amazon?page=2"
        );
    }

    #[test]
    fn category_scoped_url_filters_by_store() {
        let listing = Listing::new(
            StoreFilter::Only(Store::Amazon),
            CategoryFilter::Only(Category::Electronics),
        );
        assert_eq!(
            site().listing_url(listing, 1),
            "https://dealsheaven.in/category/electronics?store=amazon&page=1"
        );
    }

    #[test]
    fn category_slug_is_hyphenated() {
        let listing = Listing::new(
            StoreFilter::Only(Store::Paytmmall),
            CategoryFilter::Only(Category::BeautyAndPersonalCare),
        );
        assert_eq!(
            site().listing_url(listing, 3),
            "https://dealsheaven.in/category/beauty-and-personal-care?store=paytmmall&page=3"
        );
    }

    #[test]
    fn all_stores_omits_store_parameter() {
        let listing = Listing::new(StoreFilter::All, CategoryFilter::Only(Category::Grocery));
        assert_eq!(
            site().listing_url(listing, 1),
            "https://dealsheaven.in/category/grocery?page=1"
        );
    }

    #[test]
    fn all_stores_all_categories_uses_site_root() {
        let listing = Listing::new(StoreFilter::All, CategoryFilter::All);
        assert_eq!(
            site().listing_url(listing, 4),
            "https://dealsheaven.in/?page=4"
        );
    }

    #[test]
    fn deal_tab_url_uses_slug() {
        assert_eq!(
            site().deal_tab_url(DealTab::HotDealsOnline),
            "https://dealsheaven.in/hot-deals-online"
        );
        assert_eq!(
            site().deal_tab_url(DealTab::PopularDeals),
            "https://dealsheaven.in/popular-deals"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let site = Site::new("https://dealsheaven.in/").unwrap();
        assert_eq!(site.root(), "https://dealsheaven.in");
        assert_eq!(
            site.deal_tab_url(DealTab::PopularDeals),
            "https://dealsheaven.in/popular-deals"
        );
    }

    #[test]
    fn resolve_makes_relative_paths_absolute() {
        assert_eq!(
            site().resolve("/store/amazon/deal-123"),
            "https://dealsheaven.in/store/amazon/deal-123"
        );
        assert_eq!(
            site().resolve("images/p.jpg"),
            "https://dealsheaven.in/images/p.jpg"
        );
    }

    #[test]
    fn resolve_passes_absolute_urls_through() {
        assert_eq!(
            site().resolve("https://cdn.example.com/img/1.jpg"),
            "https://cdn.example.com/img/1.jpg"
        );
    }

    #[test]
    fn resolve_handles_protocol_relative_urls() {
        assert_eq!(
            site().resolve("//cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        let err = Site::new("not a url").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidBaseUrl { .. }),
            "expected InvalidBaseUrl, got: {err:?}"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            Site::new("ftp://dealsheaven.in"),
            Err(ScraperError::InvalidBaseUrl { .. })
        ));
    }
}
