use anyhow::Result;
use clap::Parser;
use pricefinder::browser::DEFAULT_WEBDRIVER_URL;
use pricefinder::models::SearchRequest;
use pricefinder::request::resolve_search_url;
use pricefinder::scrape::{self, ScrapeOptions};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Pricefinder - Amazon search scraper with region spoofing")]
struct Args {
    /// Region code for the Amazon storefront (e.g. ID for Indonesia, FR for France)
    region_code: String,

    /// Amazon search URL (e.g. https://www.amazon.com/s?k=rtx+5070)
    #[clap(long)]
    search_url: Option<String>,

    /// Search text to query Amazon (e.g. 'rtx 5070')
    #[clap(long)]
    search_text: Option<String>,

    /// Output file for results (e.g. output.csv or output.txt)
    #[clap(short, long)]
    output: Option<String>,

    /// WebDriver endpoint to drive the browser through
    #[clap(long, default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Maximum number of items to extract (if not set, extract all rows)
    #[clap(short = 'i', long)]
    max_items: Option<usize>,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    pricefinder::debug::enable(args.debug);

    // The only hard failure: no search target at all. Everything past
    // this point is logged instead of propagated.
    let search_url = resolve_search_url(args.search_url.as_deref(), args.search_text.as_deref())?;

    let request = SearchRequest {
        search_url,
        region_code: args.region_code,
        output_path: args.output,
    };
    let options = ScrapeOptions {
        webdriver_url: args.webdriver_url,
        max_items: args.max_items,
    };

    scrape::run(&request, &options).await
}
