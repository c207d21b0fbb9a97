pub mod browse;
pub mod campaign;
pub mod client;
pub mod error;
pub mod extract;
pub mod urls;
pub mod walker;

pub use browse::{BrowseError, BrowseRequest};
pub use campaign::{run_campaign, CampaignOptions, CampaignOutcome, CampaignPlan, Job, JobSummary};
pub use client::DealsClient;
pub use error::ScraperError;
pub use extract::{extract_deals, PageExtract, PlaceholderImage};
pub use urls::Site;
pub use walker::{scrape_page, walk_listing, PageRange, StopReason, WalkReport};
