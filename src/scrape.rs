use std::time::Duration;

use anyhow::{Context, Result};

use crate::browser::BrowserSession;
use crate::extractor;
use crate::models::{ResultItem, SearchRequest};
use crate::output;
use crate::region;

const RESULTS_MARKER_SELECTOR: &str = "[data-component-type='s-search-result']";
const RESULTS_WAIT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub webdriver_url: String,
    pub max_items: Option<usize>,
}

/// The whole pipeline for one run: open the session, spoof the region,
/// wait for the results to render, extract, write. Failures past argument
/// resolution are logged rather than propagated, and the session is
/// closed on every path.
pub async fn run(request: &SearchRequest, options: &ScrapeOptions) -> Result<()> {
    println!("Search URL: {}", request.search_url);

    println!("Setting up stealth browser session...");
    let session = match BrowserSession::connect(&options.webdriver_url).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to initialize browser session: {:#}", e);
            eprintln!(
                "Check that chromedriver is reachable at {} and Chrome/Chromium is installed.",
                options.webdriver_url
            );
            return Ok(());
        }
    };
    println!("Browser session initialized successfully.");

    let outcome = scrape_search_page(&session, request, options.max_items).await;
    session.close().await;

    match outcome {
        Ok(items) => {
            output::print_results(&items);
            if let Some(path) = &request.output_path {
                output::write_results(&items, path);
            }
        }
        Err(e) => eprintln!("Scraping failed: {:#}", e),
    }
    Ok(())
}

async fn scrape_search_page(
    session: &BrowserSession,
    request: &SearchRequest,
    max_items: Option<usize>,
) -> Result<Vec<ResultItem>> {
    // First navigation only establishes page context for the region
    // spoofer; it re-navigates once the region change has been sent.
    session.goto(&request.search_url).await?;
    region::set_region(session, &request.search_url, &request.region_code).await;

    session
        .wait_for_css(RESULTS_MARKER_SELECTOR, RESULTS_WAIT)
        .await
        .context("search results never appeared")?;
    println!("Page loaded successfully.");

    extractor::extract_items(session, max_items).await
}
