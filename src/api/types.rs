//! API response type definitions.

use serde::Deserialize;

/// Response wrapper for the `current_user` endpoint.
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub user: Option<CurrentUser>,
    #[serde(default)]
    pub status: String,
}

/// The authenticated account.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub full_name: Option<String>,
}

/// Response wrapper for the `web_profile_info` endpoint.
#[derive(Debug, Deserialize)]
pub struct WebProfileResponse {
    pub data: ProfileData,
}

/// Profile payload; `user` is absent for unknown handles.
#[derive(Debug, Deserialize)]
pub struct ProfileData {
    pub user: Option<ProfileUser>,
}

/// A profile and its recent timeline media.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUser {
    pub username: String,
    pub full_name: Option<String>,
    #[serde(rename = "edge_owner_to_timeline_media", default)]
    pub timeline_media: TimelineMedia,
}

/// The recent timeline edge list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineMedia {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub edges: Vec<TimelineEdge>,
}

/// A single timeline edge.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEdge {
    pub node: TimelineNode,
}

/// A timeline post node.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineNode {
    pub id: String,
    pub shortcode: Option<String>,
    #[serde(default)]
    pub is_video: bool,
    pub display_url: String,
}

impl ProfileUser {
    /// Total number of posts on the profile.
    pub fn media_count(&self) -> u64 {
        self.timeline_media.count
    }

    /// Display URLs of the most recent non-video posts, in feed order,
    /// truncated to `max` entries.
    pub fn image_urls(&self, max: usize) -> Vec<String> {
        self.timeline_media
            .edges
            .iter()
            .filter(|edge| !edge.node.is_video)
            .map(|edge| edge.node.display_url.clone())
            .take(max)
            .collect()
    }
}
