//! Closed sets of stores, categories, and deal tabs the site exposes.
//!
//! Every listing URL the scraper builds is derived from these types, so adding
//! a store or category is a compile-checked change rather than a new string in
//! a list. Each type parses from either its display label or its URL slug,
//! case-insensitively.

use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// A retailer partner whose deals the site aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    Flipkart,
    Amazon,
    Paytm,
    Foodpanda,
    Freecharge,
    Paytmmall,
}

impl Store {
    pub const ALL: [Store; 6] = [
        Store::Flipkart,
        Store::Amazon,
        Store::Paytm,
        Store::Foodpanda,
        Store::Freecharge,
        Store::Paytmmall,
    ];

    /// Label as the site spells it. `paytmmall` is lowercase on the site too.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Store::Flipkart => "Flipkart",
            Store::Amazon => "Amazon",
            Store::Paytm => "Paytm",
            Store::Foodpanda => "Foodpanda",
            Store::Freecharge => "Freecharge",
            Store::Paytmmall => "paytmmall",
        }
    }

    /// Lowercased label, used in `/store/{slug}` and `?store={slug}`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Store::Flipkart => "flipkart",
            Store::Amazon => "amazon",
            Store::Paytm => "paytm",
            Store::Foodpanda => "foodpanda",
            Store::Freecharge => "freecharge",
            Store::Paytmmall => "paytmmall",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Store {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Store::ALL
            .into_iter()
            .find(|store| {
                store.label().eq_ignore_ascii_case(needle) || store.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CatalogError::UnknownStore(s.to_string()))
    }
}

/// Store scope of a listing: every store, or one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreFilter {
    All,
    Only(Store),
}

impl StoreFilter {
    pub const ALL_LABEL: &'static str = "All Stores";

    /// `All Stores` first, then every store in catalog order.
    #[must_use]
    pub fn every() -> Vec<StoreFilter> {
        std::iter::once(StoreFilter::All)
            .chain(Store::ALL.into_iter().map(StoreFilter::Only))
            .collect()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StoreFilter::All => Self::ALL_LABEL,
            StoreFilter::Only(store) => store.label(),
        }
    }

    #[must_use]
    pub fn store(self) -> Option<Store> {
        match self {
            StoreFilter::All => None,
            StoreFilter::Only(store) => Some(store),
        }
    }
}

impl fmt::Display for StoreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StoreFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case(Self::ALL_LABEL)
            || needle.eq_ignore_ascii_case("all-stores")
            || needle.eq_ignore_ascii_case("all")
        {
            return Ok(StoreFilter::All);
        }
        needle.parse().map(StoreFilter::Only)
    }
}

/// A product category with its own listing section on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BeautyAndPersonalCare,
    Electronics,
    Grocery,
    Recharge,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::BeautyAndPersonalCare,
        Category::Electronics,
        Category::Grocery,
        Category::Recharge,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::BeautyAndPersonalCare => "Beauty And Personal Care",
            Category::Electronics => "Electronics",
            Category::Grocery => "Grocery",
            Category::Recharge => "Recharge",
        }
    }

    /// Lowercased label with spaces as hyphens, used in `/category/{slug}`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::BeautyAndPersonalCare => "beauty-and-personal-care",
            Category::Electronics => "electronics",
            Category::Grocery => "grocery",
            Category::Recharge => "recharge",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.label().eq_ignore_ascii_case(needle)
                    || category.slug().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Category scope of a listing: every category, or one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All Categories";

    /// `All Categories` first, then every category in catalog order.
    #[must_use]
    pub fn every() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_LABEL,
            CategoryFilter::Only(category) => category.label(),
        }
    }

    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if needle.eq_ignore_ascii_case(Self::ALL_LABEL)
            || needle.eq_ignore_ascii_case("all-categories")
            || needle.eq_ignore_ascii_case("all")
        {
            return Ok(CategoryFilter::All);
        }
        needle.parse().map(CategoryFilter::Only)
    }
}

/// A site section listing deals outside the store/category structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealTab {
    HotDealsOnline,
    PopularDeals,
}

impl DealTab {
    pub const ALL: [DealTab; 2] = [DealTab::HotDealsOnline, DealTab::PopularDeals];

    /// Store label given to every record scraped from a deal tab.
    pub const STORE_LABEL: &'static str = "Deals Tab";

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DealTab::HotDealsOnline => "Hot Deals Online",
            DealTab::PopularDeals => "Popular Deals",
        }
    }

    /// Path segment of the tab, e.g. `hot-deals-online`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            DealTab::HotDealsOnline => "hot-deals-online",
            DealTab::PopularDeals => "popular-deals",
        }
    }
}

impl fmt::Display for DealTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DealTab {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        DealTab::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(needle) || tab.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CatalogError::UnknownDealTab(s.to_string()))
    }
}

/// One store/category listing, walked page by page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listing {
    pub store: StoreFilter,
    pub category: CategoryFilter,
}

impl Listing {
    #[must_use]
    pub fn new(store: StoreFilter, category: CategoryFilter) -> Self {
        Self { store, category }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.store, self.category)
    }
}

/// Where a scraped record came from. Determines its store and category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Listing(Listing),
    DealTab(DealTab),
}

impl Origin {
    #[must_use]
    pub fn store_label(self) -> &'static str {
        match self {
            Origin::Listing(listing) => listing.store.label(),
            Origin::DealTab(_) => DealTab::STORE_LABEL,
        }
    }

    #[must_use]
    pub fn category_label(self) -> &'static str {
        match self {
            Origin::Listing(listing) => listing.category.label(),
            Origin::DealTab(tab) => tab.label(),
        }
    }

    /// The single store this origin is scoped to, if any.
    #[must_use]
    pub fn store(self) -> Option<Store> {
        match self {
            Origin::Listing(listing) => listing.store.store(),
            Origin::DealTab(_) => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.store_label(), self.category_label())
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
