pub mod browser;
pub mod debug;
pub mod extractor;
pub mod models;
pub mod output;
pub mod region;
pub mod request;
pub mod scrape;
