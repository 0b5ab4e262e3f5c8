//! Browser session snapshots.
//!
//! A snapshot is the serialized browser context (cookies plus local
//! storage) written to a fixed-path JSON file so a later run can resume an
//! authenticated session. Snapshots overwrite unconditionally, carry no
//! version or corruption check, and are never validated for expiry; a
//! stale one surfaces when the login screen reappears.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fixed relative path of the snapshot file.
pub const SNAPSHOT_FILE: &str = "instagram_session.json";

/// One browser cookie, as stored in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

/// A serialized browser context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
    #[serde(default)]
    pub local_storage: HashMap<String, String>,
}

impl SessionSnapshot {
    /// Where the snapshot lives, relative to the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(SNAPSHOT_FILE)
    }

    /// Whether a restorable (non-empty) snapshot exists at `path`.
    pub fn present(path: &Path) -> bool {
        std::fs::metadata(path).map(|meta| meta.len() > 0).unwrap_or(false)
    }

    /// Load a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Capture the current browser context from a live page.
    pub async fn capture(page: &Page) -> Result<Self> {
        let cookies = page
            .get_cookies()
            .await?
            .into_iter()
            .map(|cookie| StoredCookie {
                name: cookie.name,
                value: cookie.value,
                domain: cookie.domain,
                path: cookie.path,
                secure: cookie.secure,
                http_only: cookie.http_only,
            })
            .collect();

        let local_storage = dump_local_storage(page).await;

        Ok(Self {
            saved_at: Some(Utc::now()),
            cookies,
            local_storage,
        })
    }

    /// Install the snapshot's cookies into the browser context.
    ///
    /// Best-effort per cookie; a single stale entry must not block the
    /// rest of the session.
    pub async fn apply_cookies(&self, page: &Page) {
        for cookie in &self.cookies {
            let param = CookieParam::builder()
                .name(&cookie.name)
                .value(&cookie.value)
                .domain(&cookie.domain)
                .path(&cookie.path)
                .secure(cookie.secure)
                .http_only(cookie.http_only)
                .build();

            match param {
                Ok(param) => {
                    if let Err(e) = page.set_cookie(param).await {
                        tracing::warn!("Failed to set cookie {}: {}", cookie.name, e);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to build cookie {}: {}", cookie.name, e);
                }
            }
        }
    }

    /// Re-populate local storage.
    ///
    /// Only effective once the page has navigated to the origin the
    /// entries belong to.
    pub async fn apply_local_storage(&self, page: &Page) {
        if self.local_storage.is_empty() {
            return;
        }

        let entries = match serde_json::to_string(&self.local_storage) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        let script = format!(
            "(() => {{ const entries = {}; \
             for (const [key, value] of Object.entries(entries)) {{ \
                 localStorage.setItem(key, value); \
             }} }})()",
            entries
        );

        if let Err(e) = page.evaluate(script).await {
            tracing::debug!("Could not restore local storage: {}", e);
        }
    }
}

async fn dump_local_storage(page: &Page) -> HashMap<String, String> {
    const DUMP_SCRIPT: &str =
        "JSON.stringify(Object.fromEntries(Object.entries(localStorage)))";

    match page.evaluate(DUMP_SCRIPT).await {
        Ok(result) => {
            let json: String = result.into_value().unwrap_or_default();
            serde_json::from_str(&json).unwrap_or_default()
        }
        Err(e) => {
            tracing::debug!("Could not read local storage: {}", e);
            HashMap::new()
        }
    }
}
