//! Cookie-import module.
//!
//! This module provides:
//! - Firefox profile discovery and cookie database reads
//! - The import flow that turns browser cookies into a saved session

pub mod firefox;
pub mod import;

pub use import::import_from_firefox;
