//! Instagram web API HTTP client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{header, Client, StatusCode, Url};

use crate::api::types::{CurrentUserResponse, ProfileUser, WebProfileResponse};
use crate::error::{Error, Result};

/// Instagram web base URL.
const WEB_BASE: &str = "https://www.instagram.com";

/// App ID the web frontend sends with API requests.
const WEB_APP_ID: &str = "936619743392459";

/// Request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser user agent presented to the API.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0";

/// Instagram web API client with cookie-based authentication.
pub struct InstagramApi {
    client: Client,
}

impl InstagramApi {
    /// Create an anonymous client with an empty cookie jar.
    pub fn new() -> Result<Self> {
        Self::from_jar(Arc::new(Jar::default()))
    }

    /// Create a client authenticated by a cookie name→value map.
    ///
    /// All cookies are scoped to `.instagram.com`, mirroring how the
    /// browser stores them.
    pub fn with_cookies(cookies: &HashMap<String, String>) -> Result<Self> {
        let jar = Jar::default();
        let base: Url = WEB_BASE.parse()?;
        for (name, value) in cookies {
            let cookie_str = format!("{}={}; Domain=.instagram.com; Path=/", name, value);
            jar.add_cookie_str(&cookie_str, &base);
        }
        Self::from_jar(Arc::new(jar))
    }

    fn from_jar(jar: Arc<Jar>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert("x-ig-app-id", WEB_APP_ID.parse().unwrap());

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_provider(jar)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Validate the session against the live service.
    ///
    /// Returns the authenticated username, or an authentication error when
    /// the cookies are invalid or expired.
    pub async fn validate_session(&self) -> Result<String> {
        let url = format!("{}/api/v1/accounts/current_user/", WEB_BASE);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(
                "session rejected - cookies may be expired".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(Error::Api(format!(
                "current_user request failed with status {}",
                status
            )));
        }

        let body: CurrentUserResponse = response.json().await?;
        match body.user {
            Some(user) => Ok(user.username),
            None => Err(Error::Authentication(
                "no authenticated user in response".to_string(),
            )),
        }
    }

    /// Fetch a profile and its recent timeline media.
    pub async fn profile(&self, username: &str) -> Result<ProfileUser> {
        let url = format!(
            "{}/api/v1/users/web_profile_info/?username={}",
            WEB_BASE, username
        );
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::ProfileNotFound(username.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "profile request rejected with status {} - a saved session may be required",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::Api(format!(
                "profile request failed with status {}",
                status
            )));
        }

        let body: WebProfileResponse = response.json().await?;
        body.data
            .user
            .ok_or_else(|| Error::ProfileNotFound(username.to_string()))
    }
}
