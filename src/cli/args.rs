//! Command-line argument definitions using clap.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Instagram image downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "instagram-downloader",
    version,
    about = "Download images from Instagram profiles",
    long_about = "A CLI tool to download the latest images from an Instagram profile.\n\n\
                  Three front-ends are available: the web API client (api), a Firefox\n\
                  cookie-import utility (import), and a browser-automation scraper (browser).\n\
                  Anything not given as a flag is asked for interactively."
)]
pub struct Args {
    /// Front-end to run.
    #[arg(value_enum, default_value_t = Mode::Api)]
    pub mode: Mode,

    /// Profile URL or username. Prompted for when omitted.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Maximum number of images to download. Prompted for when omitted.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory", default_value = "downloads")]
    pub output_directory: PathBuf,

    /// Identity of a previously saved session to load (api mode).
    #[arg(short, long, env = "INSTA_USER")]
    pub session: Option<String>,

    /// Run the browser without a visible window (browser mode).
    /// Manual login is impossible headless; only useful with a saved session.
    #[arg(long)]
    pub headless: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// Available front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Download via the Instagram web API with an optional saved session.
    Api,
    /// Import an authenticated session from Firefox's cookie store.
    Import,
    /// Scrape rendered image URLs by driving a real browser.
    Browser,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Api => write!(f, "api"),
            Mode::Import => write!(f, "import"),
            Mode::Browser => write!(f, "browser"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::try_parse_from(["instagram-downloader"]).unwrap();
        assert_eq!(args.mode, Mode::Api);
        assert_eq!(args.output_directory, PathBuf::from("downloads"));
        assert!(args.user.is_none());
        assert!(!args.headless);
    }

    #[test]
    fn test_args_parse_browser_mode() {
        let args = Args::try_parse_from([
            "instagram-downloader",
            "browser",
            "--user",
            "@somebody",
            "-n",
            "25",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Browser);
        assert_eq!(args.user.as_deref(), Some("@somebody"));
        assert_eq!(args.count, Some(25));
    }

    #[test]
    fn test_args_command_debug_assert() {
        Args::command().debug_assert();
    }
}
