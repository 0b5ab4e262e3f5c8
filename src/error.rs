//! Error types for the instagram-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Session errors
    #[error("No 'sessionid' cookie found. Make sure you are logged into Instagram in Firefox.")]
    MissingSessionCookie,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    // Browser cookie store errors
    #[error("Firefox profile not found: {0}")]
    FirefoxProfileNotFound(String),

    #[error("Cookie database error: {0}")]
    CookieDb(#[from] rusqlite::Error),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Profile '{0}' does not exist")]
    ProfileNotFound(String),

    // Browser automation errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Chromium not found. Install chromium or google-chrome and ensure it's in your PATH.")]
    ChromiumNotFound,

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    // Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
