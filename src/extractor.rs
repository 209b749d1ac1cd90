use std::time::Duration;

use anyhow::{bail, Result};
use thirtyfour::prelude::*;
use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::debug_println;
use crate::models::ResultItem;

const LIST_ITEM_SELECTOR: &str = "[role='listitem']";
const NAME_SELECTOR: &str = ".a-size-medium.a-spacing-none.a-color-base.a-text-normal";
const PRICE_SELECTOR: &str = ".a-price";

// The results marker appears before the rows finish hydrating.
const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Walk the result rows in DOM order and pull a (name, price) pair out of
/// each. Rows missing either field are non-product content (ads,
/// separators) and are skipped.
pub async fn extract_items(
    session: &BrowserSession,
    max_items: Option<usize>,
) -> Result<Vec<ResultItem>> {
    println!("Scraping goods: names and prices...");
    sleep(SETTLE_DELAY).await;

    let rows = session.driver.find_all(By::Css(LIST_ITEM_SELECTOR)).await?;
    if rows.is_empty() {
        bail!(
            "no elements matched '{}'; the site may have changed its markup",
            LIST_ITEM_SELECTOR
        );
    }
    debug_println!("Found {} candidate rows", rows.len());

    let mut items = Vec::new();
    for row in &rows {
        if let Some(max) = max_items {
            if items.len() >= max {
                println!("Reached maximum number of items ({}), stopping", max);
                break;
            }
        }
        match extract_row(row).await {
            Some(item) => items.push(item),
            None => debug_println!("Skipping row without a name or a price"),
        }
    }
    Ok(items)
}

async fn extract_row(row: &WebElement) -> Option<ResultItem> {
    let name_element = row.find(By::Css(NAME_SELECTOR)).await.ok()?;
    let name = name_element.text().await.ok()?.trim().to_string();

    let price_element = row.find(By::Css(PRICE_SELECTOR)).await.ok()?;
    let price_text = price_element.text().await.ok()?;
    let price = first_line(&price_text).to_string();

    if name.is_empty() || price.is_empty() {
        return None;
    }
    Some(ResultItem { name, price })
}

/// The price container renders the displayed price on the first line and
/// annotations (list price, per-unit price) below it.
fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_truncates_at_the_line_break() {
        assert_eq!(first_line("$599.99\n$699.99 list price"), "$599.99");
    }

    #[test]
    fn first_line_keeps_single_line_text_intact() {
        assert_eq!(first_line("$12.49"), "$12.49");
    }

    #[test]
    fn first_line_of_empty_text_is_empty() {
        assert_eq!(first_line(""), "");
    }
}
