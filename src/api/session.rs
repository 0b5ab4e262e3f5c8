//! Persisted session files, one per authenticated identity.
//!
//! A session is the cookie name→value map that authenticated the client,
//! stored as JSON under the project data directory. No expiry metadata is
//! kept; staleness surfaces as an authentication failure on next use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Error, Result};
use crate::fs::ensure_dir;

/// Directory where session files live.
pub fn session_dir() -> PathBuf {
    ProjectDirs::from("", "", "instagram-downloader")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the session file for an identity, under `dir`.
pub fn session_path_in(dir: &Path, identity: &str) -> PathBuf {
    dir.join(format!("session-{}.json", identity))
}

/// Persist a cookie map for an identity under `dir`.
pub fn save_in(dir: &Path, identity: &str, cookies: &HashMap<String, String>) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = session_path_in(dir, identity);
    let json = serde_json::to_string_pretty(cookies)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Load a previously persisted cookie map for an identity from `dir`.
pub fn load_in(dir: &Path, identity: &str) -> Result<HashMap<String, String>> {
    let path = session_path_in(dir, identity);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::SessionStore(format!(
                "no saved session for '{}' at {}",
                identity,
                path.display()
            ))
        } else {
            Error::Io(e)
        }
    })?;
    let cookies = serde_json::from_str(&content)?;
    Ok(cookies)
}

/// Persist a cookie map for an identity in the default session directory.
pub fn save(identity: &str, cookies: &HashMap<String, String>) -> Result<PathBuf> {
    save_in(&session_dir(), identity, cookies)
}

/// Load a session for an identity from the default session directory.
pub fn load(identity: &str) -> Result<HashMap<String, String>> {
    load_in(&session_dir(), identity)
}
