use serde::Serialize;

/// Everything needed for one scraping run. Built once from the CLI
/// arguments and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub search_url: String,
    pub region_code: String,
    pub output_path: Option<String>,
}

/// One extracted product row. Price is the raw formatted text as shown
/// on the page, not a parsed number.
#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    pub name: String,
    pub price: String,
}
