//! Interactive browse requests: one listing over a page range, or one deal tab.
//!
//! Shared by the terminal `browse` command and the gallery server so both
//! accept and reject exactly the same inputs.

use dealhunter_core::{CatalogError, CategoryFilter, DealTab, Listing, StoreFilter};
use thiserror::Error;

use crate::campaign::CampaignPlan;
use crate::walker::PageRange;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrowseError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{field} must be at least 1")]
    PageBelowOne { field: &'static str },

    #[error("start page {start} is after end page {end}")]
    StartAfterEnd { start: u32, end: u32 },

    #[error("page range covers {pages} pages; at most {max} are allowed")]
    RangeTooWide { pages: u32, max: u32 },
}

/// A validated interactive request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseRequest {
    pub listing: Listing,
    /// When set, replaces the listing walk with a single deal-tab page.
    pub deal: Option<DealTab>,
    pub start_page: u32,
    pub end_page: u32,
}

impl BrowseRequest {
    /// Parses raw form values and checks the page range.
    ///
    /// `deal` of `None`, empty or `"None"` means no deal tab.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError`] for an unknown store, category or deal tab, a
    /// page below 1, a start page after the end page, or a range wider than
    /// `max_pages`.
    pub fn parse(
        store: &str,
        category: &str,
        deal: Option<&str>,
        start_page: u32,
        end_page: u32,
        max_pages: u32,
    ) -> Result<Self, BrowseError> {
        let store: StoreFilter = store.parse()?;
        let category: CategoryFilter = category.parse()?;
        let deal = match deal.map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("none") => None,
            Some(raw) => Some(raw.parse::<DealTab>()?),
        };

        let request = Self {
            listing: Listing::new(store, category),
            deal,
            start_page,
            end_page,
        };
        request.validate(max_pages)?;
        Ok(request)
    }

    fn validate(&self, max_pages: u32) -> Result<(), BrowseError> {
        if self.start_page < 1 {
            return Err(BrowseError::PageBelowOne { field: "start_page" });
        }
        if self.end_page < 1 {
            return Err(BrowseError::PageBelowOne { field: "end_page" });
        }
        if self.start_page > self.end_page {
            return Err(BrowseError::StartAfterEnd {
                start: self.start_page,
                end: self.end_page,
            });
        }
        // The range is not walked when a deal tab is chosen.
        if self.deal.is_none() {
            let pages = self.end_page - self.start_page + 1;
            if pages > max_pages {
                return Err(BrowseError::RangeTooWide {
                    pages,
                    max: max_pages,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn plan(&self) -> CampaignPlan {
        match self.deal {
            Some(tab) => CampaignPlan::deal_tab(tab),
            None => CampaignPlan::single(
                self.listing,
                PageRange::inclusive(self.start_page, self.end_page),
            ),
        }
    }
}
