//! Instagram web API module.
//!
//! This module provides:
//! - HTTP client for the Instagram web API
//! - Per-identity session persistence
//! - API response types

pub mod client;
pub mod session;
pub mod types;

pub use client::InstagramApi;
pub use types::{ProfileUser, TimelineNode};
