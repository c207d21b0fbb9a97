//! Command handlers that drive campaigns from the terminal.
//!
//! Scrape failures never abort a command: they are logged by the scraper and
//! surface here as an empty or short result. Only bad flags, bad config and
//! output-file errors are returned as `Err`.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use dealhunter_core::{filter_by_title, AppConfig};
use dealhunter_scraper::{
    run_campaign, BrowseRequest, CampaignOptions, CampaignPlan, DealsClient, Site,
};

use crate::export;

pub(crate) fn build_deals_client(config: &AppConfig) -> anyhow::Result<DealsClient> {
    DealsClient::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build deals client: {e}"))
}

pub(crate) fn build_site(config: &AppConfig) -> anyhow::Result<Site> {
    Site::new(&config.base_url).map_err(|e| anyhow::anyhow!("invalid base url: {e}"))
}

/// Export settings after CLI flags have been layered over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportSettings {
    pub output: PathBuf,
    pub concurrency: usize,
    pub page_limit: Option<u32>,
}

/// `--max-pages 0` lifts the per-walk bound, mirroring
/// `DEALHUNTER_MAX_PAGES_PER_WALK=0`.
pub(crate) fn resolve_export_settings(
    config: &AppConfig,
    output: Option<PathBuf>,
    max_pages: Option<u32>,
    concurrency: Option<usize>,
) -> anyhow::Result<ExportSettings> {
    let concurrency = concurrency.unwrap_or(config.max_concurrent_walks);
    if concurrency == 0 {
        anyhow::bail!("--concurrency must be at least 1");
    }
    let page_limit = match max_pages {
        Some(0) => None,
        Some(n) => Some(n),
        None => config.max_pages_per_walk,
    };
    Ok(ExportSettings {
        output: output.unwrap_or_else(|| config.output_path.clone()),
        concurrency,
        page_limit,
    })
}

/// Runs the batch campaign and writes every record to CSV.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the CSV file cannot be
/// written. An empty campaign still writes a header-only file.
pub(crate) async fn run_export(config: &AppConfig, settings: &ExportSettings) -> anyhow::Result<()> {
    let client = build_deals_client(config)?;
    let site = build_site(config)?;
    let plan = CampaignPlan::batch();

    let started = Instant::now();
    let outcome = run_campaign(
        &client,
        &site,
        &plan,
        CampaignOptions::batch(settings.concurrency, settings.page_limit),
    )
    .await;

    for job in &outcome.jobs {
        println!(
            "{:<42} {:>5} records {:>4} pages ({})",
            job.job.to_string(),
            job.records,
            job.pages_visited,
            job.stop
        );
    }

    if outcome.deals.is_empty() {
        tracing::warn!("campaign produced no records; writing header only");
    }

    let written = export::export_csv(&settings.output, &outcome.deals)?;
    println!(
        "exported {written} deals from {} jobs to {}",
        outcome.jobs.len(),
        settings.output.display()
    );
    println!(
        "scraping completed in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Raw `browse` flags.
#[derive(Debug, Clone)]
pub(crate) struct BrowseArgs {
    pub store: String,
    pub category: String,
    pub deal: Option<String>,
    pub start_page: u32,
    pub end_page: u32,
    pub query: Option<String>,
}

/// Runs one interactive campaign and prints matching records as JSON lines.
///
/// # Errors
///
/// Returns an error for invalid flags or if stdout cannot be written.
pub(crate) async fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<()> {
    let request = BrowseRequest::parse(
        &args.store,
        &args.category,
        args.deal.as_deref(),
        args.start_page,
        args.end_page,
        config.max_interactive_pages,
    )?;

    let client = build_deals_client(config)?;
    let site = build_site(config)?;
    let outcome = run_campaign(
        &client,
        &site,
        &request.plan(),
        CampaignOptions::interactive(),
    )
    .await;

    let found = outcome.deals.len();
    if found == 0 {
        tracing::warn!(listing = %request.listing, "no products found");
        return Ok(());
    }

    let deals = match args.query.as_deref() {
        Some(query) => filter_by_title(outcome.deals, query),
        None => outcome.deals,
    };

    let mut out = std::io::stdout().lock();
    for deal in &deals {
        serde_json::to_writer(&mut out, deal)?;
        writeln!(out)?;
    }
    tracing::info!(found, shown = deals.len(), "browse finished");
    Ok(())
}

/// First URL of every job in the batch plan, in plan order.
pub(crate) fn planned_urls(site: &Site) -> Vec<String> {
    CampaignPlan::batch()
        .jobs()
        .iter()
        .map(|job| job.first_url(site))
        .collect()
}

pub(crate) fn run_urls(config: &AppConfig) -> anyhow::Result<()> {
    let site = build_site(config)?;
    for url in planned_urls(&site) {
        println!("{url}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the file cannot be read as an export.
pub(crate) fn run_inspect(path: &std::path::Path) -> anyhow::Result<()> {
    let rows = export::read_deals_csv(path)?;
    for (store, count) in export::rows_per_store(&rows) {
        println!("{store:<16} {count:>6}");
    }
    println!("{:<16} {:>6}", "total", rows.len());
    Ok(())
}
