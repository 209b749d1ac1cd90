use std::time::Duration;

use anyhow::{Context, Result};
use thirtyfour::prelude::*;
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities};

use crate::debug_println;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One headless Chrome session, driven through a WebDriver endpoint.
/// Opened at most once per run; `close` must be called on every exit path.
pub struct BrowserSession {
    pub driver: WebDriver,
}

impl BrowserSession {
    /// Connect to the WebDriver endpoint with a Chrome configured to keep
    /// automation fingerprints down: new headless mode, sandboxing and
    /// shared memory off, and the automation switches suppressed.
    pub async fn connect(webdriver_url: &str) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--headless=new")?;
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_experimental_option("excludeSwitches", serde_json::json!(["enable-automation"]))?;

        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .with_context(|| format!("failed to connect to WebDriver at {}", webdriver_url))?;

        debug_println!("Browser session initialized at {}", webdriver_url);
        Ok(BrowserSession { driver })
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .with_context(|| format!("failed to load {}", url))?;
        Ok(())
    }

    /// Bounded wait for the first element matching `css`, polling until
    /// the timeout elapses.
    pub async fn wait_for_css(&self, css: &str, timeout: Duration) -> Result<WebElement> {
        let element = self
            .driver
            .query(By::Css(css))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .with_context(|| format!("timed out waiting for '{}'", css))?;
        Ok(element)
    }

    /// Release the browser. A failed quit is only worth a warning; the
    /// run's outcome is already decided by this point.
    pub async fn close(self) {
        match self.driver.quit().await {
            Ok(()) => println!("Browser session cleaned up."),
            Err(e) => eprintln!("Failed to close browser session: {}", e),
        }
    }
}
