//! Instagram Image Downloader
//!
//! This library provides three front-ends for downloading the latest
//! images from an Instagram profile:
//!
//! - an Instagram web API client with saved-session support
//! - a Firefox cookie-import utility that turns a logged-in browser
//!   session into a saved session for the API client
//! - a browser-automation scraper that drives a real Chromium and
//!   harvests rendered image URLs straight from the DOM
//!
//! # Example
//!
//! ```no_run
//! use instagram_downloader::api::InstagramApi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = InstagramApi::new()?;
//!     let profile = api.profile("somebody").await?;
//!     let urls = profile.image_urls(10);
//!
//!     // ... download logic
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod cli;
pub mod cookies;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;
pub mod username;

// Re-exports for convenience
pub use api::InstagramApi;
pub use browser::SessionSnapshot;
pub use download::{download_images, DownloadStats, DownloadTarget, HttpImageFetcher};
pub use error::{Error, Result};
