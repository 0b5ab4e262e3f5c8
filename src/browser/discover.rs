//! Image discovery on a rendered profile page.
//!
//! A heuristic DOM scraper: there is no paginated API here, so candidate
//! URLs are harvested by polling a list of selectors while scrolling, and
//! the loop gives up after a fixed number of rounds that produce nothing
//! new. The selector list, exclusion markers and URL-length gate track
//! Instagram's current markup and will need adjusting when it changes.

use std::collections::HashSet;
use std::time::Duration;

use chromiumoxide::{Element, Page};
use tokio::time::sleep;

use crate::error::Result;
use crate::output::print_info;

/// Selector strategies tried in order each round.
const SELECTOR_STRATEGIES: &[&str] = &[
    "article img",
    "img[src*=\"instagram\"]",
    "a[href*=\"/p/\"] img",
    "div._aagv img",
    "img[alt]",
];

/// A candidate `src` must contain one of these.
const CDN_HINTS: &[&str] = &["instagram", "fbcdn"];

/// Thumbnail and profile-icon markers, excluded by substring.
const EXCLUDED_MARKERS: &[&str] = &["profile_pic", "s150x150", "s50x50", "icon"];

/// URLs at or below this length are placeholders, not assets.
const MIN_ASSET_URL_LEN: usize = 50;

/// Scroll step per round, in pixels.
const SCROLL_STEP_PX: u32 = 800;

/// Pause after each scroll so lazy-loaded content can render.
const SCROLL_SETTLE: Duration = Duration::from_secs(2);

/// Consecutive no-progress rounds before giving up.
const MAX_STAGNANT_ROUNDS: u32 = 5;

/// Unique candidate URLs plus the stagnation counter, threaded through
/// the discovery rounds.
#[derive(Debug, Default)]
pub struct DiscoverySet {
    found: HashSet<String>,
    stagnant_rounds: u32,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    pub fn insert(&mut self, url: String) {
        self.found.insert(url);
    }

    /// Close out a round that started with `len_before` URLs: no growth
    /// bumps the stagnation counter, any growth resets it.
    pub fn finish_round(&mut self, len_before: usize) {
        if self.found.len() == len_before {
            self.stagnant_rounds += 1;
        } else {
            self.stagnant_rounds = 0;
        }
    }

    /// True once enough consecutive rounds produced nothing new.
    pub fn exhausted(&self) -> bool {
        self.stagnant_rounds >= MAX_STAGNANT_ROUNDS
    }

    /// Consume the set, yielding at most `max` URLs.
    pub fn into_urls(self, max: usize) -> Vec<String> {
        self.found.into_iter().take(max).collect()
    }
}

/// Harvest image URLs from the page until `max_images` are found or the
/// page stops yielding new ones.
pub async fn discover(page: &Page, max_images: usize) -> Result<Vec<String>> {
    let mut set = DiscoverySet::new();

    while set.len() < max_images && !set.exhausted() {
        let elements = collect_image_elements(page).await;
        tracing::debug!("Matched {} img elements this round", elements.len());

        let len_before = set.len();
        for element in &elements {
            let src = element.attribute("src").await.ok().flatten();
            let srcset = element.attribute("srcset").await.ok().flatten();
            harvest_candidate(src.as_deref(), srcset.as_deref(), &mut set);
        }
        set.finish_round(len_before);

        print_info(&format!("Unique images found: {}", set.len()));

        scroll_down(page).await;
        sleep(SCROLL_SETTLE).await;
    }

    Ok(set.into_urls(max_images))
}

/// Run every selector strategy and pool the matches; fall back to every
/// `img` on the page when none of them hit.
async fn collect_image_elements(page: &Page) -> Vec<Element> {
    let mut all = Vec::new();
    for selector in SELECTOR_STRATEGIES {
        if let Ok(elements) = page.find_elements(*selector).await {
            all.extend(elements);
        }
    }

    if all.is_empty() {
        print_info("No images matched the standard selectors; scanning every img element");
        if let Ok(elements) = page.find_elements("img").await {
            all = elements;
        }
    }

    all
}

/// Apply the candidate filters to one element's attributes and record the
/// surviving URLs.
///
/// `srcset` is preferred when present: the long entries in it are the
/// high-resolution variants. Without one, the plain `src` qualifies only
/// past the same length gate.
fn harvest_candidate(src: Option<&str>, srcset: Option<&str>, set: &mut DiscoverySet) {
    let src = match src {
        Some(src) => src,
        None => return,
    };

    if !CDN_HINTS.iter().any(|hint| src.contains(hint)) {
        return;
    }
    if EXCLUDED_MARKERS.iter().any(|marker| src.contains(marker)) {
        return;
    }

    match srcset.map(str::trim).filter(|s| !s.is_empty()) {
        Some(srcset) => {
            for entry in srcset.split(',') {
                let url = entry.trim().split(' ').next().unwrap_or("");
                if url.len() > MIN_ASSET_URL_LEN {
                    set.insert(url.to_string());
                }
            }
        }
        None => {
            if src.len() > MIN_ASSET_URL_LEN {
                set.insert(src.to_string());
            }
        }
    }
}

async fn scroll_down(page: &Page) {
    let script = format!("window.scrollBy(0, {})", SCROLL_STEP_PX);
    if let Err(e) = page.evaluate(script).await {
        tracing::debug!("Scroll failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_url(id: &str) -> String {
        format!(
            "https://scontent.cdninstagram.com/v/t51.2885-15/{}_n.jpg?stp=dst-jpg&_nc_ht=sc",
            id
        )
    }

    #[test]
    fn test_harvest_plain_src() {
        let mut set = DiscoverySet::new();
        let url = asset_url("100");
        harvest_candidate(Some(&url), None, &mut set);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_harvest_requires_cdn_hint() {
        let mut set = DiscoverySet::new();
        let url = "https://unrelated.example.org/a-very-long-path/with/enough/chars/image.jpg";
        harvest_candidate(Some(url), None, &mut set);
        assert!(set.is_empty());
    }

    #[test]
    fn test_harvest_excludes_thumbnail_markers() {
        let mut set = DiscoverySet::new();
        for marker in ["profile_pic", "s150x150", "s50x50", "icon"] {
            let url = format!(
                "https://scontent.cdninstagram.com/v/{}/some-long-enough-asset-path/img.jpg",
                marker
            );
            harvest_candidate(Some(&url), None, &mut set);
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_harvest_short_src_is_placeholder() {
        let mut set = DiscoverySet::new();
        harvest_candidate(Some("https://fbcdn.net/x.jpg"), None, &mut set);
        assert!(set.is_empty());
    }

    #[test]
    fn test_harvest_srcset_keeps_only_long_entries() {
        let mut set = DiscoverySet::new();
        let long = asset_url("640");
        let srcset = format!("{} 640w, https://fbcdn.net/s.jpg 150w", long);
        harvest_candidate(Some(&asset_url("src")), Some(&srcset), &mut set);

        assert_eq!(set.len(), 1);
        let urls = set.into_urls(10);
        assert_eq!(urls, vec![long]);
    }

    #[test]
    fn test_harvest_srcset_preferred_over_src() {
        let mut set = DiscoverySet::new();
        let src = asset_url("plain");
        let variant = asset_url("variant");
        let srcset = format!("{} 1080w", variant);
        harvest_candidate(Some(&src), Some(&srcset), &mut set);

        let urls = set.into_urls(10);
        assert_eq!(urls, vec![variant]);
    }

    #[test]
    fn test_harvest_dedups_across_strategies() {
        // The same element surfacing under several selectors counts once
        let mut set = DiscoverySet::new();
        let url = asset_url("dup");
        for _ in 0..3 {
            harvest_candidate(Some(&url), None, &mut set);
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_one_round_yields_qualifying_minus_excluded() {
        // N distinct qualifying URLs, K of them carrying exclusion markers
        let mut set = DiscoverySet::new();
        let n = 6;
        let k = 2;

        for i in 0..(n - k) {
            harvest_candidate(Some(&asset_url(&i.to_string())), None, &mut set);
        }
        for i in 0..k {
            let url = format!(
                "https://scontent.cdninstagram.com/v/s150x150/long-enough-path-{}/img.jpg",
                i
            );
            harvest_candidate(Some(&url), None, &mut set);
        }

        assert_eq!(set.len(), n - k);
    }

    #[test]
    fn test_stagnation_terminates_after_five_quiet_rounds() {
        let max_images = usize::MAX;
        let mut set = DiscoverySet::new();
        set.insert(asset_url("seed"));

        let mut rounds = 0;
        while set.len() < max_images && !set.exhausted() {
            let len_before = set.len();
            // page yields nothing new
            set.finish_round(len_before);
            rounds += 1;
            assert!(rounds <= 5, "loop must stop within 5 quiet rounds");
        }
        assert_eq!(rounds, 5);
    }

    #[test]
    fn test_progress_resets_stagnation() {
        let mut set = DiscoverySet::new();
        for round in 0..4 {
            set.finish_round(set.len());
            assert!(!set.exhausted(), "round {}", round);
        }

        // growth on the fifth round resets the counter
        let len_before = set.len();
        set.insert(asset_url("fresh"));
        set.finish_round(len_before);
        assert!(!set.exhausted());

        for _ in 0..4 {
            set.finish_round(set.len());
            assert!(!set.exhausted());
        }
        set.finish_round(set.len());
        assert!(set.exhausted());
    }

    #[test]
    fn test_into_urls_truncates_to_max() {
        let mut set = DiscoverySet::new();
        for i in 0..10 {
            set.insert(asset_url(&i.to_string()));
        }
        assert_eq!(set.into_urls(4).len(), 4);
    }
}
