use axum::{
    extract::{Query, State},
    Extension, Json,
};
use dealhunter_core::{filter_by_title, DealRecord};
use dealhunter_scraper::{run_campaign, BrowseError, BrowseRequest, CampaignOptions};
use serde::Deserialize;
use thiserror::Error;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Raw browse parameters shared by `/deals` and `/api/v1/deals`.
///
/// Every field arrives as text so that an empty form input reaches
/// validation instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct DealsQuery {
    pub store: Option<String>,
    pub category: Option<String>,
    pub deal: Option<String>,
    pub start_page: Option<String>,
    pub end_page: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum InvalidQuery {
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error(transparent)]
    Browse(#[from] BrowseError),
}

impl DealsQuery {
    pub(crate) fn browse_request(&self, max_pages: u32) -> Result<BrowseRequest, InvalidQuery> {
        let start_page = parse_page("start_page", self.start_page.as_deref())?;
        let end_page = parse_page("end_page", self.end_page.as_deref())?;
        let request = BrowseRequest::parse(
            self.store.as_deref().unwrap_or("All Stores"),
            self.category.as_deref().unwrap_or("All Categories"),
            self.deal.as_deref(),
            start_page,
            end_page,
            max_pages,
        )?;
        Ok(request)
    }

    /// The trimmed title filter, if one was given.
    pub(crate) fn title_filter(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Missing or blank pages default to 1.
fn parse_page(field: &'static str, raw: Option<&str>) -> Result<u32, InvalidQuery> {
    match raw.map(str::trim) {
        None | Some("") => Ok(1),
        Some(value) => value.parse().map_err(|_| InvalidQuery::NotANumber {
            field,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug)]
pub(crate) struct BrowseResult {
    /// Records after the title filter.
    pub deals: Vec<DealRecord>,
    /// Records scraped before filtering.
    pub found: usize,
    pub pages: u32,
}

/// Runs one interactive campaign, one page at a time.
pub(crate) async fn run_browse(
    state: &AppState,
    request: &BrowseRequest,
    title_filter: Option<&str>,
) -> BrowseResult {
    let outcome = run_campaign(
        &state.client,
        &state.site,
        &request.plan(),
        CampaignOptions::interactive(),
    )
    .await;

    let found = outcome.deals.len();
    let pages = outcome.pages_visited();
    if found == 0 {
        tracing::warn!(listing = %request.listing, deal = ?request.deal, "no products found");
    }

    let deals = match title_filter {
        Some(query) => filter_by_title(outcome.deals, query),
        None => outcome.deals,
    };
    BrowseResult {
        deals,
        found,
        pages,
    }
}

pub(super) async fn list_deals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DealsQuery>,
) -> Result<Json<ApiResponse<Vec<DealRecord>>>, ApiError> {
    let request = query
        .browse_request(state.config.max_interactive_pages)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let result = run_browse(&state, &request, query.title_filter()).await;

    let mut meta = ResponseMeta::new(req_id.0);
    meta.total = Some(result.deals.len());
    meta.pages = Some(result.pages);
    Ok(Json(ApiResponse {
        data: result.deals,
        meta,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use std::sync::Arc;

    use super::super::test_support::{body_text, config, get, listing_html, state};
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> DealsQuery {
        let mut q = DealsQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "store" => q.store = value,
                "category" => q.category = value,
                "deal" => q.deal = value,
                "start_page" => q.start_page = value,
                "end_page" => q.end_page = value,
                "q" => q.q = value,
                other => panic!("unexpected key {other}"),
            }
        }
        q
    }

    #[test]
    fn empty_query_browses_all_listings_page_one() {
        let request = DealsQuery::default().browse_request(5).expect("valid");
        assert_eq!(request.start_page, 1);
        assert_eq!(request.end_page, 1);
        assert_eq!(request.deal, None);
    }

    #[test]
    fn blank_page_inputs_default_to_one() {
        let request = query(&[("start_page", ""), ("end_page", " ")])
            .browse_request(5)
            .expect("valid");
        assert_eq!((request.start_page, request.end_page), (1, 1));
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let err = query(&[("start_page", "-2")]).browse_request(5).unwrap_err();
        assert!(matches!(
            err,
            InvalidQuery::NotANumber { field: "start_page", .. }
        ));
    }

    #[test]
    fn title_filter_ignores_blank_query() {
        assert_eq!(query(&[("q", "   ")]).title_filter(), None);
        assert_eq!(query(&[("q", " mouse ")]).title_filter(), Some("mouse"));
    }

    #[tokio::test]
    async fn invalid_store_is_validation_error() {
        let response = get(
            state("http://127.0.0.1:9"),
            "/api/v1/deals?store=Walmart",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json parse");
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["message"], "unknown store: Walmart");
    }

    #[tokio::test]
    async fn range_wider_than_limit_is_validation_error() {
        let response = get(
            state("http://127.0.0.1:9"),
            "/api/v1/deals?store=Amazon&start_page=1&end_page=6",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn returns_scraped_deals_with_counts() {
        let server = MockServer::start().await;
        for (page, titles) in [("1", vec!["Wireless Mouse", "USB Hub"]), ("2", vec!["Gaming Mouse"])] {
            Mock::given(method("GET"))
                .and(path("/category/electronics"))
                .and(query_param("store", "amazon"))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&titles)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let response = get(
            state(&server.uri()),
            "/api/v1/deals?store=Amazon&category=Electronics&start_page=1&end_page=2&q=mouse",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json parse");
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["title"], "Wireless Mouse");
        assert_eq!(data[0]["store"], "Amazon");
        assert_eq!(data[0]["category"], "Electronics");
        assert_eq!(data[0]["link"], format!("{}/deal/0", server.uri()));
        assert_eq!(data[1]["title"], "Gaming Mouse");
        assert_eq!(json["meta"]["total"], 2);
        assert_eq!(json["meta"]["pages"], 2);
    }

    #[tokio::test]
    async fn interactive_range_is_not_cut_by_walk_page_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/store/flipkart"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["Phone"])))
            .expect(4)
            .mount(&server)
            .await;

        let mut settings = config(&server.uri());
        settings.max_pages_per_walk = Some(2);
        settings.max_interactive_pages = 5;
        let mut app_state = state(&server.uri());
        app_state.config = Arc::new(settings);

        let response = get(
            app_state,
            "/api/v1/deals?store=Flipkart&start_page=1&end_page=4",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json parse");
        assert_eq!(json["meta"]["total"], 4);
        assert_eq!(json["meta"]["pages"], 4);
    }

    #[tokio::test]
    async fn deal_type_scrapes_the_deal_tab() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/popular-deals"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["Popular thing"])))
            .expect(1)
            .mount(&server)
            .await;

        let response = get(
            state(&server.uri()),
            "/api/v1/deals?store=Amazon&deal=popular-deals",
        )
        .await;
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json parse");
        assert_eq!(json["data"][0]["store"], "Deals Tab");
        assert_eq!(json["data"][0]["category"], "Popular Deals");
    }
}
