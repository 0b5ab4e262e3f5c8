//! Download module.
//!
//! This module provides:
//! - Sequential image downloading with politeness throttling
//! - Download target and statistics tracking

pub mod images;
pub mod state;

pub use images::{download_images, HttpImageFetcher, ImageFetcher};
pub use state::{DownloadStats, DownloadTarget};
