//! The deal record extracted from one product block on a listing page.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::catalog::Origin;

/// Rendering of [`Field::Missing`] in every output.
pub const MISSING: &str = "N/A";

/// A text field that is always present on a record but may hold no value.
///
/// Consumers index records by field name, so a field that could not be
/// extracted is kept as `Missing` and rendered as [`MISSING`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    Present(String),
    #[default]
    Missing,
}

impl Field {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Field::Present(value) => value,
            Field::Missing => MISSING,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing => None,
        }
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Missing, Field::Present)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Present(value.to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One product scraped from a listing or deal-tab page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealRecord {
    pub origin: Origin,
    pub title: Field,
    /// Absolute image URL, or a placeholder when the block had no image.
    pub image: String,
    pub price: Field,
    pub discount: Field,
    pub special_price: Field,
    /// Absolute URL of the deal detail page.
    pub link: Field,
}

impl DealRecord {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 8] = [
        "Store",
        "Category",
        "Title",
        "Image",
        "Price",
        "Discount",
        "Special Price",
        "Link",
    ];

    #[must_use]
    pub fn store(&self) -> &'static str {
        self.origin.store_label()
    }

    #[must_use]
    pub fn category(&self) -> &'static str {
        self.origin.category_label()
    }

    /// Field values in [`Self::COLUMNS`] order.
    #[must_use]
    pub fn row(&self) -> [&str; 8] {
        [
            self.store(),
            self.category(),
            self.title.as_str(),
            self.image.as_str(),
            self.price.as_str(),
            self.discount.as_str(),
            self.special_price.as_str(),
            self.link.as_str(),
        ]
    }

    /// Case-insensitive substring match on the title.
    ///
    /// A blank query matches every record; a missing title matches only a
    /// blank query.
    #[must_use]
    pub fn matches_title(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.title
            .value()
            .is_some_and(|title| title.to_lowercase().contains(&query.to_lowercase()))
    }
}

impl Serialize for DealRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DealRecord", 8)?;
        state.serialize_field("store", self.store())?;
        state.serialize_field("category", self.category())?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("image", &self.image)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("discount", &self.discount)?;
        state.serialize_field("special_price", &self.special_price)?;
        state.serialize_field("link", &self.link)?;
        state.end()
    }
}

/// Keeps only the records whose title contains `query`.
#[must_use]
pub fn filter_by_title(deals: Vec<DealRecord>, query: &str) -> Vec<DealRecord> {
    deals.into_iter().filter(|d| d.matches_title(query)).collect()
}
