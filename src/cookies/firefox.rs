//! Firefox cookie store access.
//!
//! Firefox keeps cookies unencrypted in a per-profile SQLite database. The
//! live file may be exclusively locked by a running browser, so reads go
//! through a copy in a temporary directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::{Error, Result};

/// Cookie database filename inside a profile directory.
const COOKIE_DB: &str = "cookies.sqlite";

/// Marker naming the profile Firefox uses by default.
const DEFAULT_PROFILE_MARKER: &str = "default-release";

const INSTAGRAM_COOKIE_QUERY: &str =
    "SELECT name, value, host FROM moz_cookies WHERE host LIKE '%instagram.com'";

/// Platform directory holding the Firefox profiles.
pub fn profiles_root() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    let root = if cfg!(target_os = "windows") {
        base.config_dir().join("Mozilla").join("Firefox").join("Profiles")
    } else if cfg!(target_os = "macos") {
        base.home_dir()
            .join("Library")
            .join("Application Support")
            .join("Firefox")
            .join("Profiles")
    } else {
        base.home_dir().join(".mozilla").join("firefox")
    };
    Some(root)
}

/// Pick the active-looking profile directory under `root`.
///
/// Prefers a profile whose name contains the default marker; otherwise the
/// first profile that has a cookie database at all.
pub fn find_profile(root: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(root).ok()?;

    let mut with_cookies = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() && path.join(COOKIE_DB).is_file() {
            with_cookies.push(path);
        }
    }

    with_cookies
        .iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains(DEFAULT_PROFILE_MARKER))
        })
        .cloned()
        .or_else(|| with_cookies.into_iter().next())
}

/// Read Instagram cookies out of a profile's cookie database.
///
/// Empty values are skipped; on duplicate names the last row wins.
pub fn read_instagram_cookies(cookie_db: &Path) -> Result<HashMap<String, String>> {
    let staging = tempfile::tempdir()?;
    let copied = staging.path().join(COOKIE_DB);
    std::fs::copy(cookie_db, &copied)?;

    let conn = Connection::open(&copied)?;
    let mut statement = conn.prepare(INSTAGRAM_COOKIE_QUERY)?;
    let rows = statement.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut cookies = HashMap::new();
    for row in rows {
        let (name, value) = row?;
        if value.is_empty() {
            continue;
        }
        cookies.insert(name, value);
    }

    Ok(cookies)
    // staging drops here; cleanup failures are swallowed by TempDir
}

/// Locate the active Firefox profile and read its Instagram cookies.
pub fn collect() -> Result<HashMap<String, String>> {
    let root = profiles_root().ok_or_else(|| {
        Error::FirefoxProfileNotFound("could not determine the Firefox profiles directory".into())
    })?;

    if !root.is_dir() {
        return Err(Error::FirefoxProfileNotFound(format!(
            "{} does not exist",
            root.display()
        )));
    }

    let profile = find_profile(&root).ok_or_else(|| {
        Error::FirefoxProfileNotFound(format!(
            "no profile with a {} under {}",
            COOKIE_DB,
            root.display()
        ))
    })?;

    tracing::info!("Using Firefox profile: {}", profile.display());
    read_instagram_cookies(&profile.join(COOKIE_DB))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join(COOKIE_DB), b"").unwrap();
        dir
    }

    #[test]
    fn test_find_profile_prefers_default_release() {
        let tmp = tempfile::tempdir().unwrap();
        make_profile(tmp.path(), "abcd1234.other");
        let preferred = make_profile(tmp.path(), "wxyz5678.default-release");

        assert_eq!(find_profile(tmp.path()), Some(preferred));
    }

    #[test]
    fn test_find_profile_falls_back_to_any_with_cookies() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("empty.profile")).unwrap();
        let only = make_profile(tmp.path(), "abcd1234.other");

        assert_eq!(find_profile(tmp.path()), Some(only));
    }

    #[test]
    fn test_find_profile_none_without_cookie_db() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("empty.profile")).unwrap();

        assert_eq!(find_profile(tmp.path()), None);
    }

    #[test]
    fn test_read_instagram_cookies_filters_and_dedups() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join(COOKIE_DB);

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE moz_cookies (name TEXT, value TEXT, host TEXT);
             INSERT INTO moz_cookies VALUES ('sessionid', 'stale', '.instagram.com');
             INSERT INTO moz_cookies VALUES ('sessionid', 'fresh', 'www.instagram.com');
             INSERT INTO moz_cookies VALUES ('csrftoken', '', '.instagram.com');
             INSERT INTO moz_cookies VALUES ('mid', 'm1', '.instagram.com');
             INSERT INTO moz_cookies VALUES ('unrelated', 'x', '.example.com');",
        )
        .unwrap();
        drop(conn);

        let cookies = read_instagram_cookies(&db_path).unwrap();
        // host filter, empty-value skip, last value wins
        assert_eq!(cookies.get("sessionid").map(String::as_str), Some("fresh"));
        assert!(!cookies.contains_key("csrftoken"));
        assert_eq!(cookies.get("mid").map(String::as_str), Some("m1"));
        assert!(!cookies.contains_key("unrelated"));
    }
}
