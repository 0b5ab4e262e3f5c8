//! Browser-automation scraper.
//!
//! Drives a real Chromium over CDP to render a profile page, resuming a
//! saved session when one exists, and harvests image URLs from the DOM.
//! One browser, one page, one profile per run.

pub mod discover;
pub mod login;
pub mod snapshot;

pub use snapshot::SessionSnapshot;

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;

use crate::error::{Error, Result};
use crate::output::{print_info, print_success, print_warning};

/// Browser user agent presented to Instagram.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-navigation timeout.
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after navigation for dynamic content to settle.
const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Common Chromium executable locations.
const CHROME_PATHS: &[&str] = &[
    // Linux
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    // macOS
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

/// A launched browser with the one page driving the profile.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
}

impl BrowserSession {
    /// Launch Chromium and open a blank page.
    pub async fn launch(headless: bool) -> Result<Self> {
        let executable = find_chromium()?;

        let mut builder = BrowserConfig::builder().chrome_executable(executable);
        if !headless {
            builder = builder.with_head();
        }
        builder = builder
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-dev-shm-usage")
            .arg("--window-size=1280,800");

        let config = builder
            .build()
            .map_err(|e| Error::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be drained for the browser to make progress
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        page.execute(SetUserAgentOverrideParams::new(
            BROWSER_USER_AGENT.to_string(),
        ))
        .await?;

        Ok(Self { browser, page })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate with a timeout, then give the page time to settle.
    pub async fn goto(&self, url: &str) -> Result<()> {
        let params = NavigateParams::builder()
            .url(url)
            .build()
            .map_err(|e| Error::Browser(format!("Invalid URL: {}", e)))?;

        tokio::time::timeout(NAVIGATION_TIMEOUT, self.page.execute(params))
            .await
            .map_err(|_| {
                Error::Browser(format!(
                    "Navigation timed out after {}s for {}",
                    NAVIGATION_TIMEOUT.as_secs(),
                    url
                ))
            })??;

        sleep(SETTLE_DELAY).await;
        Ok(())
    }

    /// Close the browser, best-effort.
    pub async fn close(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
    }
}

/// Scrape a profile with a real browser and return the discovered image
/// URLs, at most `max_images` of them.
pub async fn scrape_profile(
    username: &str,
    max_images: usize,
    headless: bool,
) -> Result<Vec<String>> {
    let snapshot_path = SessionSnapshot::default_path();
    let had_snapshot = SessionSnapshot::present(&snapshot_path);

    let snapshot = if had_snapshot {
        match SessionSnapshot::load(&snapshot_path) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                print_warning(&format!("Could not load session snapshot: {}", e));
                None
            }
        }
    } else {
        None
    };

    print_info("Launching browser...");
    let session = BrowserSession::launch(headless).await?;

    if let Some(snapshot) = &snapshot {
        print_info("Restoring saved session...");
        snapshot.apply_cookies(session.page()).await;
    } else if !had_snapshot {
        print_info("Starting a fresh session (first run)...");
    }

    let profile_url = format!("https://www.instagram.com/{}/", username);
    print_info(&format!("Navigating to {}", profile_url));
    if let Err(e) = session.goto(&profile_url).await {
        // The page is often still usable after a slow first load
        print_warning(&format!("First navigation: {}", e));
    }

    if let Some(snapshot) = &snapshot {
        // storage entries only apply once their origin is loaded
        snapshot.apply_local_storage(session.page()).await;
    }

    if login::login_required(session.page()).await {
        login::wait_for_manual_login()?;

        let captured = SessionSnapshot::capture(session.page()).await?;
        captured.save(&snapshot_path)?;
        print_success(&format!("Session saved to {}", snapshot_path.display()));

        print_info(&format!("Navigating back to {}", profile_url));
        session.goto(&profile_url).await?;
    }

    print_info(&format!("Collecting images (max: {})...", max_images));
    let urls = discover::discover(session.page(), max_images).await?;

    // First-run fallback: keep whatever context this session ended with
    if !SessionSnapshot::present(&snapshot_path) {
        save_fallback_snapshot(session.page(), &snapshot_path).await;
    }

    session.close().await;
    Ok(urls)
}

async fn save_fallback_snapshot(page: &Page, path: &PathBuf) {
    match SessionSnapshot::capture(page).await {
        Ok(snapshot) => match snapshot.save(path) {
            Ok(()) => print_success(&format!("Session saved to {}", path.display())),
            Err(e) => print_warning(&format!("Could not save session snapshot: {}", e)),
        },
        Err(e) => print_warning(&format!("Could not capture session snapshot: {}", e)),
    }
}

fn find_chromium() -> Result<PathBuf> {
    for path in CHROME_PATHS {
        let candidate = std::path::Path::new(path);
        if candidate.exists() {
            tracing::info!("Found Chromium at {}", path);
            return Ok(candidate.to_path_buf());
        }
    }

    for command in &["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
        if let Ok(output) = std::process::Command::new("which").arg(command).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    tracing::info!("Found Chromium in PATH: {}", path);
                    return Ok(PathBuf::from(path));
                }
            }
        }
    }

    Err(Error::ChromiumNotFound)
}
