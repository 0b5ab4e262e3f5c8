//! Sequential image downloading.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::download::state::{DownloadStats, DownloadTarget};
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, numbered_filename};
use crate::output::create_item_bar;

/// Per-request timeout.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed politeness delay between requests, regardless of outcome.
const REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Browser user agent sent with image fetches.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0";

/// Fetches a single image by URL.
#[async_trait]
pub trait ImageFetcher {
    /// Fetch `url`. `Ok(Some(bytes))` on HTTP 200, `Ok(None)` on any other
    /// status; transport failures surface as errors.
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

/// HTTP-backed fetcher used outside of tests.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Download(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let mut data = Vec::with_capacity(response.content_length().unwrap_or(0) as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
            data.extend_from_slice(&chunk);
        }

        Ok(Some(data))
    }
}

/// Download `urls` sequentially into the target folder.
///
/// Any per-URL failure (non-200, timeout, network or write error) is
/// recorded as skipped and the batch continues; it never aborts. Filenames
/// are numbered by position in `urls`.
pub async fn download_images<F: ImageFetcher>(
    fetcher: &F,
    urls: &[String],
    target: &DownloadTarget,
) -> Result<DownloadStats> {
    ensure_dir(&target.directory)?;

    let bar = create_item_bar(urls.len() as u64, "Downloading");
    let mut stats = DownloadStats::default();

    for (index, url) in urls.iter().enumerate() {
        match fetcher.fetch(url).await {
            Ok(Some(data)) => {
                let filename = numbered_filename(&target.username, index + 1);
                match tokio::fs::write(target.directory.join(&filename), &data).await {
                    Ok(()) => {
                        stats.record_success();
                        tracing::debug!("Saved {}", filename);
                    }
                    Err(e) => {
                        stats.record_skip();
                        tracing::warn!("Failed to write {}: {}", filename, e);
                    }
                }
            }
            Ok(None) => {
                stats.record_skip();
                tracing::warn!("Skipped {} (non-200 response)", url);
            }
            Err(e) => {
                stats.record_skip();
                tracing::warn!("Skipped {}: {}", url, e);
            }
        }

        bar.inc(1);
        sleep(REQUEST_DELAY).await;
    }

    bar.finish_and_clear();
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Scripted fetcher: one canned outcome per URL, keyed by suffix.
    struct ScriptedFetcher;

    #[async_trait]
    impl ImageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
            if url.ends_with("/bad") {
                Ok(None)
            } else if url.ends_with("/broken") {
                Err(Error::Download("connection reset".to_string()))
            } else {
                Ok(Some(vec![0xff, 0xd8, 0xff]))
            }
        }
    }

    fn target_in(dir: &Path) -> DownloadTarget {
        DownloadTarget::new(dir, "somebody")
    }

    #[tokio::test]
    async fn test_non_200_skips_and_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let target = target_in(tmp.path());
        let urls = vec![
            "https://cdn.example/a".to_string(),
            "https://cdn.example/bad".to_string(),
            "https://cdn.example/c".to_string(),
        ];

        let stats = download_images(&ScriptedFetcher, &urls, &target)
            .await
            .unwrap();

        assert_eq!(stats.attempted, 3);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.skipped, 1);

        // Numbering is positional: the third URL keeps its sequence slot
        assert!(target.directory.join("somebody_0001.jpg").is_file());
        assert!(!target.directory.join("somebody_0002.jpg").exists());
        assert!(target.directory.join("somebody_0003.jpg").is_file());
    }

    #[tokio::test]
    async fn test_transport_error_skips_and_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let target = target_in(tmp.path());
        let urls = vec![
            "https://cdn.example/broken".to_string(),
            "https://cdn.example/b".to_string(),
        ];

        let stats = download_images(&ScriptedFetcher, &urls, &target)
            .await
            .unwrap();

        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.skipped, 1);
        assert!(target.directory.join("somebody_0002.jpg").is_file());
    }

    #[tokio::test]
    async fn test_creates_output_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = target_in(&tmp.path().join("nested"));

        let stats = download_images(&ScriptedFetcher, &[], &target).await.unwrap();
        assert_eq!(stats.attempted, 0);
        assert!(target.directory.is_dir());
    }
}
