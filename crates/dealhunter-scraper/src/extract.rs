//! Product extraction from listing and deal-tab markup.
//!
//! ## Observed page structure
//!
//! ```html
//! <div class="product-item-detail">
//!   <div class="discount">40% Off</div>
//!   <a href="/store/amazon/deal-slug"><img src="/lazy.gif" data-src="/img/p.jpg"></a>
//!   <div class="deatls-inner">
//!     <h3 title="Product name">Product name</h3>
//!     <p class="price">₹1,999</p>
//!     <p class="spacail-price">₹1,199</p>
//!   </div>
//! </div>
//! ```
//!
//! The `deatls-inner` and `spacail-price` misspellings are the site's own.
//! Every field is looked up independently; a missing element degrades only
//! that field.

use std::sync::LazyLock;

use dealhunter_core::{DealRecord, Field, Origin, Store};
use scraper::{ElementRef, Html, Selector};

use crate::urls::Site;

mod selectors {
    use super::{LazyLock, Selector};

    fn parse(css: &str) -> Selector {
        Selector::parse(css).expect("valid product selector")
    }

    pub(super) static PRODUCT_ITEM: LazyLock<Selector> =
        LazyLock::new(|| parse("div.product-item-detail"));
    pub(super) static DISCOUNT: LazyLock<Selector> = LazyLock::new(|| parse("div.discount"));
    pub(super) static LINK: LazyLock<Selector> = LazyLock::new(|| parse("a[href]"));
    pub(super) static IMAGE: LazyLock<Selector> = LazyLock::new(|| parse("img[src]"));
    pub(super) static DETAILS: LazyLock<Selector> = LazyLock::new(|| parse("div.deatls-inner"));
    pub(super) static TITLE: LazyLock<Selector> = LazyLock::new(|| parse("h3[title]"));
    pub(super) static PRICE: LazyLock<Selector> = LazyLock::new(|| parse("p.price"));
    pub(super) static SPECIAL_PRICE: LazyLock<Selector> =
        LazyLock::new(|| parse("p.spacail-price"));
}

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/150";

/// Image used for a product block that carries no `img[src]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderImage {
    /// One placeholder for every record.
    #[default]
    Generic,
    /// A placeholder captioned with the store name.
    PerStore,
}

impl PlaceholderImage {
    #[must_use]
    pub fn url_for(self, origin: Origin) -> String {
        match self {
            PlaceholderImage::Generic => PLACEHOLDER_BASE.to_string(),
            PlaceholderImage::PerStore => {
                let caption = match origin.store() {
                    Some(Store::Flipkart) => "Flipkart",
                    Some(Store::Amazon) => "Amazon",
                    Some(Store::Paytm) => "Paytm",
                    Some(Store::Foodpanda) => "Foodpanda",
                    Some(Store::Freecharge) => "Freecharge",
                    Some(Store::Paytmmall) => "PaytmMall",
                    None => "All+Stores",
                };
                format!("{PLACEHOLDER_BASE}?text={caption}")
            }
        }
    }
}

/// Result of extracting one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageExtract {
    /// The page had no product blocks at all. Ends pagination.
    Empty,
    /// One record per product block; never empty.
    Deals(Vec<DealRecord>),
}

impl PageExtract {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, PageExtract::Empty)
    }

    #[must_use]
    pub fn into_deals(self) -> Vec<DealRecord> {
        match self {
            PageExtract::Empty => Vec::new(),
            PageExtract::Deals(deals) => deals,
        }
    }
}

/// Maps every product block in `html` to a [`DealRecord`] labelled with
/// `origin`. Blocks without an image get `placeholder`.
#[must_use]
pub fn extract_deals(html: &str, site: &Site, origin: Origin, placeholder: &str) -> PageExtract {
    let document = Html::parse_document(html);

    let deals: Vec<DealRecord> = document
        .select(&selectors::PRODUCT_ITEM)
        .map(|item| extract_item(item, site, origin, placeholder))
        .collect();

    tracing::debug!(%origin, blocks = deals.len(), "extracted product blocks");

    if deals.is_empty() {
        PageExtract::Empty
    } else {
        PageExtract::Deals(deals)
    }
}

fn extract_item(item: ElementRef<'_>, site: &Site, origin: Origin, placeholder: &str) -> DealRecord {
    let discount = first_text(item, &selectors::DISCOUNT);

    let link = item
        .select(&selectors::LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| site.resolve(href));

    // Only images with an eager `src` count; the lazy `data-src` wins when both exist.
    let image = item
        .select(&selectors::IMAGE)
        .next()
        .and_then(|img| img.value().attr("data-src").or_else(|| img.value().attr("src")))
        .map_or_else(|| placeholder.to_string(), |src| site.resolve(src));

    let details = item.select(&selectors::DETAILS).next();

    let title = details
        .and_then(|d| d.select(&selectors::TITLE).next())
        .and_then(|h| h.value().attr("title"))
        .map(|t| t.trim().to_string());
    let price = details.and_then(|d| first_text(d, &selectors::PRICE));
    let special_price = details.and_then(|d| first_text(d, &selectors::SPECIAL_PRICE));

    DealRecord {
        origin,
        title: Field::from(title),
        image,
        price: Field::from(price),
        discount: Field::from(discount),
        special_price: Field::from(special_price),
        link: Field::from(link),
    }
}

/// Trimmed text content of the first descendant matching `selector`.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
