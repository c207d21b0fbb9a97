//! Page-number pagination over one listing.
//!
//! The site has no "next page" marker: a walk keeps requesting
//! `page=1, 2, 3, ...` until a page comes back without product blocks (or
//! cannot be fetched at all). The walk is a small state machine:
//!
//! ```text
//! Fetching(n) -> Extracted(records, n) -> Fetching(n + 1)
//!            \-> Done(reason)
//! ```
//!
//! A walk also stops after the last page of an inclusive range, or once it
//! has visited `page_limit` pages.

use std::fmt;

use dealhunter_core::{DealRecord, Listing, Origin};

use crate::client::DealsClient;
use crate::extract::{extract_deals, PageExtract, PlaceholderImage};
use crate::urls::Site;

/// Pages a walk may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    /// Last page, inclusive. `None` walks until an empty page.
    pub end: Option<u32>,
}

impl PageRange {
    #[must_use]
    pub fn until_empty(start: u32) -> Self {
        Self { start, end: None }
    }

    #[must_use]
    pub fn inclusive(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    fn contains(self, page: u32) -> bool {
        page >= self.start && self.end.is_none_or(|end| page <= end)
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Page `n` failed to fetch or had no product blocks.
    EmptyPage(u32),
    /// Every page in the inclusive range was non-empty.
    RangeEnd,
    /// The walk visited its maximum number of pages.
    PageLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EmptyPage(page) => write!(f, "empty page {page}"),
            StopReason::RangeEnd => f.write_str("end of range"),
            StopReason::PageLimit => f.write_str("page limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    pub records: Vec<DealRecord>,
    pub pages_visited: u32,
    pub stop: StopReason,
}

enum WalkState {
    Fetching(u32),
    Extracted(Vec<DealRecord>, u32),
    Done(StopReason),
}

/// Fetches `url` and extracts it. A failed fetch counts as an empty page.
pub async fn scrape_page(
    client: &DealsClient,
    site: &Site,
    url: &str,
    origin: Origin,
    placeholder: PlaceholderImage,
) -> PageExtract {
    let Some(html) = client.fetch_page(url).await else {
        return PageExtract::Empty;
    };

    let extract = extract_deals(&html, site, origin, &placeholder.url_for(origin));
    if extract.is_empty() {
        tracing::info!(url, "no products found");
    }
    extract
}

/// Walks `listing` over `range`, accumulating records until a stop condition.
pub async fn walk_listing(
    client: &DealsClient,
    site: &Site,
    listing: Listing,
    range: PageRange,
    page_limit: Option<u32>,
    placeholder: PlaceholderImage,
) -> WalkReport {
    let origin = Origin::Listing(listing);
    let mut records: Vec<DealRecord> = Vec::new();
    let mut pages_visited = 0u32;
    let mut state = WalkState::Fetching(range.start);

    loop {
        state = match state {
            WalkState::Fetching(page) if !range.contains(page) => {
                WalkState::Done(StopReason::RangeEnd)
            }
            WalkState::Fetching(_) if page_limit.is_some_and(|limit| pages_visited >= limit) => {
                tracing::warn!(
                    store = listing.store.label(),
                    category = listing.category.label(),
                    pages_visited,
                    "page limit reached; stopping walk"
                );
                WalkState::Done(StopReason::PageLimit)
            }
            WalkState::Fetching(page) => {
                pages_visited += 1;
                let url = site.listing_url(listing, page);
                tracing::info!(
                    url = %url,
                    store = listing.store.label(),
                    category = listing.category.label(),
                    page,
                    "scraping listing page"
                );
                match scrape_page(client, site, &url, origin, placeholder).await {
                    PageExtract::Empty => WalkState::Done(StopReason::EmptyPage(page)),
                    PageExtract::Deals(deals) => WalkState::Extracted(deals, page),
                }
            }
            WalkState::Extracted(deals, page) => {
                records.extend(deals);
                match page.checked_add(1) {
                    Some(next) => WalkState::Fetching(next),
                    None => WalkState::Done(StopReason::RangeEnd),
                }
            }
            WalkState::Done(stop) => {
                tracing::debug!(
                    store = listing.store.label(),
                    category = listing.category.label(),
                    records = records.len(),
                    pages_visited,
                    ?stop,
                    "walk finished"
                );
                return WalkReport {
                    records,
                    pages_visited,
                    stop,
                };
            }
        };
    }
}
