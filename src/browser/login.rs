//! Login-state detection and the manual-login pause.

use chromiumoxide::Page;

use crate::cli::prompt;
use crate::error::Result;
use crate::output::{print_divider, print_info};

/// Probe the rendered page for a login control.
///
/// Matches the English "Log in" label; the login-path anchor is the
/// fallback for localized UIs, being layout- rather than
/// language-dependent.
const LOGIN_PROBE_SCRIPT: &str = r#"
(() => {
    const labelled = Array
        .from(document.querySelectorAll('button, a, span, div[role="button"]'))
        .some((el) => el.textContent.trim().toLowerCase() === 'log in');
    if (labelled) {
        return true;
    }
    return document.querySelector('a[href*="/accounts/login"]') !== null;
})()
"#;

/// Whether the page is currently showing a login prompt.
pub async fn login_required(page: &Page) -> bool {
    match page.evaluate(LOGIN_PROBE_SCRIPT).await {
        Ok(result) => result.into_value().unwrap_or(false),
        Err(e) => {
            tracing::debug!("Login probe failed: {}", e);
            false
        }
    }
}

/// Block until the user reports having logged in through the visible
/// browser window.
pub fn wait_for_manual_login() -> Result<()> {
    print_divider();
    print_info("You are not logged in to Instagram.");
    print_info("Log in manually in the browser window, then come back here.");
    print_divider();
    prompt::pause("Press Enter once you are logged in")
}
