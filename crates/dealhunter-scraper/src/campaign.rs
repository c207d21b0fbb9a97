//! Campaign plans and the runner that drives them.
//!
//! A campaign is an ordered list of jobs: listing walks and single-page
//! deal-tab scrapes. Jobs share one [`DealsClient`] and nothing else; each
//! returns its own record list and the lists are concatenated in plan order
//! once every job has finished.

use std::fmt;

use dealhunter_core::{CategoryFilter, DealRecord, DealTab, Listing, Origin, StoreFilter};
use futures::stream::{self, StreamExt};

use crate::client::DealsClient;
use crate::extract::{PageExtract, PlaceholderImage};
use crate::urls::Site;
use crate::walker::{scrape_page, walk_listing, PageRange, StopReason};

/// One unit of work in a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Walk { listing: Listing, range: PageRange },
    /// Single page, no pagination.
    DealTab(DealTab),
}

impl Job {
    /// URL of the first page this job requests.
    #[must_use]
    pub fn first_url(&self, site: &Site) -> String {
        match *self {
            Job::Walk { listing, range } => site.listing_url(listing, range.start),
            Job::DealTab(tab) => site.deal_tab_url(tab),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::Walk { listing, .. } => write!(f, "{listing}"),
            Job::DealTab(tab) => write!(f, "{} / {tab}", DealTab::STORE_LABEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignPlan {
    jobs: Vec<Job>,
}

impl CampaignPlan {
    /// Every store filter crossed with every category filter, each walked
    /// from page 1 until empty, followed by every deal tab.
    #[must_use]
    pub fn batch() -> Self {
        let mut jobs: Vec<Job> = StoreFilter::every()
            .into_iter()
            .flat_map(|store| {
                CategoryFilter::every().into_iter().map(move |category| Job::Walk {
                    listing: Listing::new(store, category),
                    range: PageRange::until_empty(1),
                })
            })
            .collect();
        jobs.extend(DealTab::ALL.into_iter().map(Job::DealTab));
        Self { jobs }
    }

    /// One listing over `range`.
    #[must_use]
    pub fn single(listing: Listing, range: PageRange) -> Self {
        Self {
            jobs: vec![Job::Walk { listing, range }],
        }
    }

    /// One deal tab.
    #[must_use]
    pub fn deal_tab(tab: DealTab) -> Self {
        Self {
            jobs: vec![Job::DealTab(tab)],
        }
    }

    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignOptions {
    /// Jobs in flight at once. Values below 1 are treated as 1.
    pub concurrency: usize,
    /// Pages a single walk may visit; `None` is unbounded.
    pub page_limit: Option<u32>,
    pub placeholder: PlaceholderImage,
}

impl CampaignOptions {
    /// Concurrent walks with the generic placeholder image.
    #[must_use]
    pub fn batch(concurrency: usize, page_limit: Option<u32>) -> Self {
        Self {
            concurrency,
            page_limit,
            placeholder: PlaceholderImage::Generic,
        }
    }

    /// One job at a time, pages in sequence, store-captioned placeholders.
    ///
    /// No page limit: an interactive range is already bounded when the
    /// request is validated, and every page in it is walked.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            concurrency: 1,
            page_limit: None,
            placeholder: PlaceholderImage::PerStore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub job: Job,
    pub records: usize,
    pub pages_visited: u32,
    pub stop: StopReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CampaignOutcome {
    /// All records, in plan order.
    pub deals: Vec<DealRecord>,
    pub jobs: Vec<JobSummary>,
}

impl CampaignOutcome {
    #[must_use]
    pub fn pages_visited(&self) -> u32 {
        self.jobs.iter().map(|j| j.pages_visited).sum()
    }
}

/// Runs every job in `plan` and merges their records.
///
/// No job failure is fatal; the worst case is an empty outcome.
pub async fn run_campaign(
    client: &DealsClient,
    site: &Site,
    plan: &CampaignPlan,
    options: CampaignOptions,
) -> CampaignOutcome {
    let concurrency = options.concurrency.max(1);
    tracing::info!(jobs = plan.len(), concurrency, "starting campaign");

    let results: Vec<(JobSummary, Vec<DealRecord>)> = stream::iter(plan.jobs().iter().copied())
        .map(|job| run_job(client, site, job, options))
        .buffered(concurrency)
        .collect()
        .await;

    let mut outcome = CampaignOutcome::default();
    for (summary, deals) in results {
        outcome.deals.extend(deals);
        outcome.jobs.push(summary);
    }

    let empty_jobs = outcome.jobs.iter().filter(|j| j.records == 0).count();
    if empty_jobs > 0 {
        tracing::debug!(empty_jobs, "some jobs produced no records");
    }
    tracing::info!(
        records = outcome.deals.len(),
        pages = outcome.pages_visited(),
        "campaign finished"
    );

    outcome
}

async fn run_job(
    client: &DealsClient,
    site: &Site,
    job: Job,
    options: CampaignOptions,
) -> (JobSummary, Vec<DealRecord>) {
    match job {
        Job::Walk { listing, range } => {
            let report = walk_listing(
                client,
                site,
                listing,
                range,
                options.page_limit,
                options.placeholder,
            )
            .await;
            let summary = JobSummary {
                job,
                records: report.records.len(),
                pages_visited: report.pages_visited,
                stop: report.stop,
            };
            (summary, report.records)
        }
        Job::DealTab(tab) => {
            let url = site.deal_tab_url(tab);
            tracing::info!(url = %url, deal_tab = tab.label(), "scraping deal tab");
            let extract =
                scrape_page(client, site, &url, Origin::DealTab(tab), options.placeholder).await;
            let stop = match extract {
                PageExtract::Empty => StopReason::EmptyPage(1),
                PageExtract::Deals(_) => StopReason::RangeEnd,
            };
            let deals = extract.into_deals();
            let summary = JobSummary {
                job,
                records: deals.len(),
                pages_visited: 1,
                stop,
            };
            (summary, deals)
        }
    }
}
