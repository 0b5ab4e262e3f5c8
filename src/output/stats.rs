//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::download::DownloadStats;

/// Print a discovery summary.
pub fn print_discovery_stats(found: usize, requested: usize) {
    println!();
    println!("{}", style("Discovery:").bold());
    println!("  Unique image URLs: {}", style(found).green());
    if found < requested {
        println!("  Requested:         {}", requested);
    }
}

/// Print a download summary.
pub fn print_download_stats(stats: &DownloadStats, output_dir: &Path) {
    println!();
    println!("{}", style("Downloads:").bold());
    println!("  Attempted: {}", stats.attempted);
    println!("  Succeeded: {}", style(stats.succeeded).green());
    if stats.skipped > 0 {
        println!("  Skipped:   {}", style(stats.skipped).yellow());
    } else {
        println!("  Skipped:   {}", stats.skipped);
    }
    println!("  Location:  {}", output_dir.display());
}
