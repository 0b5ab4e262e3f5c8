//! Instagram Image Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use instagram_downloader::{
    api::{session, InstagramApi},
    browser,
    cli::{prompt, Args, Mode},
    cookies,
    download::{download_images, DownloadTarget, HttpImageFetcher},
    error::Result,
    output::{
        print_banner, print_discovery_stats, print_divider, print_download_stats, print_error,
        print_info, print_warning,
    },
    username,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    let result = match args.mode {
        Mode::Api => run_api(&args).await,
        Mode::Import => cookies::import_from_firefox().await,
        Mode::Browser => run_browser(&args).await,
    };

    if let Err(e) = result {
        print_error(&format!("{}", e));
    }

    // Every error path is reported through the console; the exit status
    // stays zero either way.
    ExitCode::SUCCESS
}

/// Download via the web API, optionally authenticated by a saved session.
async fn run_api(args: &Args) -> Result<()> {
    let input = prompt::username(args.user.clone())?;
    let user = username::normalize(&input);
    let count = prompt::image_count(args.count)?;

    let api = match &args.session {
        Some(identity) => match session::load(identity) {
            Ok(cookies) => {
                print_info(&format!("Loaded session for: {}", identity));
                InstagramApi::with_cookies(&cookies)?
            }
            Err(e) => {
                print_warning(&format!("Could not load session: {}", e));
                print_info("Continuing without authentication");
                InstagramApi::new()?
            }
        },
        None => InstagramApi::new()?,
    };

    print_info(&format!("Fetching profile: {}", user));
    let profile = api.profile(&user).await?;

    print_info(&format!(
        "Profile found: {}",
        profile.full_name.as_deref().unwrap_or(&profile.username)
    ));
    print_info(&format!("Total posts: {}", profile.media_count()));

    let urls = profile.image_urls(count);
    if urls.is_empty() {
        print_warning("No images found!");
        return Ok(());
    }

    let target = DownloadTarget::new(&args.output_directory, &user);
    print_info(&format!(
        "Downloading {} images to {}",
        urls.len(),
        target.directory.display()
    ));
    print_divider();

    let fetcher = HttpImageFetcher::new()?;
    let stats = download_images(&fetcher, &urls, &target).await?;
    print_download_stats(&stats, &target.directory);

    Ok(())
}

/// Scrape a profile by driving a real browser, then download the results.
async fn run_browser(args: &Args) -> Result<()> {
    let input = prompt::username(args.user.clone())?;
    let user = username::normalize(&input);
    let count = prompt::image_count(args.count)?;

    let urls = browser::scrape_profile(&user, count, args.headless).await?;
    print_discovery_stats(urls.len(), count);

    if urls.is_empty() {
        print_warning("No images found!");
        return Ok(());
    }

    let target = DownloadTarget::new(&args.output_directory, &user);
    print_info(&format!(
        "Downloading images to {}",
        target.directory.display()
    ));
    print_divider();

    let fetcher = HttpImageFetcher::new()?;
    let stats = download_images(&fetcher, &urls, &target).await?;
    print_download_stats(&stats, &target.directory);

    Ok(())
}
