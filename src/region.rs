use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;
use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::debug_println;

const CSRF_TOKEN_SELECTOR: &str = "div[data-toaster-csrftoken]";
const CSRF_TOKEN_ATTR: &str = "data-toaster-csrftoken";
const CSRF_TOKEN_HEADER: &str = "anti-csrftoken-a2z";
const ADDRESS_CHANGE_URL: &str =
    "https://www.amazon.com/portal-migration/hz/glow/address-change?actionSource=glow";

const TOKEN_WAIT: Duration = Duration::from_secs(20);
const APPLY_PAUSE: Duration = Duration::from_secs(1);

// The callback receives the response body, so the script only resolves
// once the request has completed inside the page.
const POST_SCRIPT: &str = r#"
    const [url, headers, payload, done] = arguments;
    fetch(url, {
        method: "POST",
        headers: headers,
        body: JSON.stringify(payload)
    })
    .then(response => response.text())
    .then(text => done(text))
    .catch(error => done("Error: " + error.message));
"#;

/// Switch the site's perceived shopping region before the real page load.
/// Every failure here is soft: the run continues with whatever region was
/// already in effect.
pub async fn set_region(session: &BrowserSession, search_url: &str, region_code: &str) {
    println!("Setting region to {}...", region_code);
    match try_set_region(session, search_url, region_code).await {
        Ok(()) => println!("Sent region change request for {}", region_code),
        Err(e) => eprintln!("Failed to set region via POST request: {:#}", e),
    }
}

async fn try_set_region(
    session: &BrowserSession,
    search_url: &str,
    region_code: &str,
) -> Result<()> {
    let csrf_token = fetch_csrf_token(session).await;

    let user_agent: String = session
        .driver
        .execute("return navigator.userAgent;", Vec::new())
        .await
        .context("failed to read the page user agent")?
        .convert()
        .context("unexpected user agent value")?;

    let mut headers = json!({
        "Content-Type": "application/json",
        "User-Agent": user_agent,
    });
    if let Some(token) = csrf_token {
        headers[CSRF_TOKEN_HEADER] = json!(token);
    }

    let payload = json!({
        "locationType": "COUNTRY",
        "district": region_code,
        "countryCode": region_code,
        "deviceType": "web",
        "storeContext": "generic",
        "pageType": "Search",
        "actionSource": "glow",
    });

    let response = session
        .driver
        .execute_async(POST_SCRIPT, vec![json!(ADDRESS_CHANGE_URL), headers, payload])
        .await
        .context("in-page region change request failed")?;
    debug_println!("Region change response: {}", response.json());

    // Give the server a moment to apply the change, then re-navigate so
    // the rendered results reflect the new region.
    sleep(APPLY_PAUSE).await;
    session.goto(search_url).await?;
    Ok(())
}

/// Scrape the anti-forgery token the site expects on state-changing
/// requests. Missing token is not fatal; the request goes out without it.
async fn fetch_csrf_token(session: &BrowserSession) -> Option<String> {
    println!("Waiting for the anti-forgery token element...");
    let element = match session.wait_for_css(CSRF_TOKEN_SELECTOR, TOKEN_WAIT).await {
        Ok(element) => element,
        Err(e) => {
            eprintln!("Error retrieving anti-forgery token: {:#}", e);
            return None;
        }
    };

    match element.attr(CSRF_TOKEN_ATTR).await {
        Ok(Some(token)) if !token.is_empty() => {
            debug_println!("Found anti-forgery token: {}", token);
            Some(token)
        }
        Ok(_) => {
            eprintln!("Anti-forgery token attribute is empty.");
            None
        }
        Err(e) => {
            eprintln!("Error retrieving anti-forgery token: {}", e);
            None
        }
    }
}
