//! Server-rendered card gallery: a search form plus one card per deal.
//!
//! Scraping happens inside the request, one page at a time, so a wide page
//! range makes the browser wait for every page.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use dealhunter_core::{CategoryFilter, DealRecord, DealTab, StoreFilter};

use crate::api::{run_browse, AppState, BrowseResult, DealsQuery};

struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

struct Notice {
    /// CSS modifier: `success`, `warning`, `info` or `error`.
    kind: &'static str,
    text: String,
}

struct Card {
    title: String,
    /// Text matched by the in-page filter; empty when the title is missing.
    filter_title: String,
    image: String,
    price: String,
    special_price: String,
    discount: String,
    link: String,
    has_link: bool,
}

impl From<&DealRecord> for Card {
    fn from(deal: &DealRecord) -> Self {
        Self {
            title: deal.title.as_str().to_string(),
            filter_title: deal.title.value().unwrap_or_default().to_string(),
            image: deal.image.clone(),
            price: deal.price.as_str().to_string(),
            special_price: deal.special_price.as_str().to_string(),
            discount: deal.discount.as_str().to_string(),
            link: deal.link.as_str().to_string(),
            has_link: !deal.link.is_missing(),
        }
    }
}

#[derive(Template)]
#[template(path = "gallery.html")]
struct GalleryTemplate {
    stores: Vec<SelectOption>,
    categories: Vec<SelectOption>,
    deals: Vec<SelectOption>,
    start_page: String,
    end_page: String,
    query: String,
    notices: Vec<Notice>,
    cards: Vec<Card>,
    show_filter: bool,
}

impl GalleryTemplate {
    /// The form, pre-filled from `query`, with no results yet.
    fn form(query: &DealsQuery) -> Self {
        let store = query
            .store
            .as_deref()
            .and_then(|s| s.parse::<StoreFilter>().ok())
            .unwrap_or(StoreFilter::All);
        let category = query
            .category
            .as_deref()
            .and_then(|c| c.parse::<CategoryFilter>().ok())
            .unwrap_or(CategoryFilter::All);
        let deal = query.deal.as_deref().and_then(|d| d.parse::<DealTab>().ok());

        let stores = StoreFilter::every()
            .into_iter()
            .map(|option| SelectOption {
                value: option.label(),
                label: option.label(),
                selected: option == store,
            })
            .collect();
        let categories = CategoryFilter::every()
            .into_iter()
            .map(|option| SelectOption {
                value: option.label(),
                label: option.label(),
                selected: option == category,
            })
            .collect();
        let deals = std::iter::once(SelectOption {
            value: "",
            label: "None",
            selected: deal.is_none(),
        })
        .chain(DealTab::ALL.into_iter().map(|tab| SelectOption {
            value: tab.label(),
            label: tab.label(),
            selected: deal == Some(tab),
        }))
        .collect();

        Self {
            stores,
            categories,
            deals,
            start_page: page_value(query.start_page.as_deref()),
            end_page: page_value(query.end_page.as_deref()),
            query: query.q.clone().unwrap_or_default(),
            notices: Vec::new(),
            cards: Vec::new(),
            show_filter: false,
        }
    }

    fn show_results(&mut self, result: &BrowseResult, filtered: bool) {
        if result.found == 0 {
            self.notices.push(Notice {
                kind: "warning",
                text: "No products found.".to_string(),
            });
            return;
        }
        self.notices.push(Notice {
            kind: "success",
            text: format!("Found {} products!", result.found),
        });
        if filtered {
            self.notices.push(Notice {
                kind: "info",
                text: format!("Filtered to {} results.", result.deals.len()),
            });
        }
        self.cards = result.deals.iter().map(Card::from).collect();
        self.show_filter = true;
    }

    fn show_error(&mut self, message: String) {
        self.notices.push(Notice {
            kind: "error",
            text: message,
        });
    }
}

fn page_value(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "1".to_string(),
    }
}

fn render(page: &GalleryTemplate) -> Response {
    match page.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "gallery template failed to render");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

pub(crate) async fn index() -> Response {
    render(&GalleryTemplate::form(&DealsQuery::default()))
}

pub(crate) async fn deals_page(
    State(state): State<AppState>,
    Query(query): Query<DealsQuery>,
) -> Response {
    let mut page = GalleryTemplate::form(&query);
    match query.browse_request(state.config.max_interactive_pages) {
        Ok(request) => {
            let filter = query.title_filter();
            let result = run_browse(&state, &request, filter).await;
            page.show_results(&result, filter.is_some());
        }
        Err(e) => page.show_error(e.to_string()),
    }
    render(&page)
}
