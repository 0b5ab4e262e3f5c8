//! Filesystem module.
//!
//! Path and filename helpers for the per-user output folders.

pub mod paths;

pub use paths::{ensure_dir, numbered_filename, user_folder};
