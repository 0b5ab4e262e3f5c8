//! Session import: lift an authenticated Instagram session out of Firefox
//! and persist it for the `api` front-end.

use std::collections::HashMap;

use crate::api::{session, InstagramApi};
use crate::cli::prompt;
use crate::cookies::firefox;
use crate::error::{Error, Result};
use crate::output::{print_info, print_success, print_warning};

/// The one cookie a usable session cannot do without.
pub const SESSION_COOKIE: &str = "sessionid";

/// Cookies Instagram issues to logged-in browsers, reported for visibility.
const ESSENTIAL_COOKIES: &[&str] = &["sessionid", "csrftoken", "ds_user_id", "mid", "ig_did"];

/// Import a session from the local Firefox cookie store.
///
/// Validates the lifted cookies against the live service before anything
/// is persisted; the session file is named by the authenticated identity.
pub async fn import_from_firefox() -> Result<()> {
    print_info("Pre-requisites:");
    print_info("  1. Firefox installed");
    print_info("  2. Logged into Instagram in Firefox");
    print_info("  3. Firefox closed");
    prompt::pause("Press Enter when ready")?;

    print_info("Extracting cookies from Firefox...");
    let cookies = firefox::collect()?;
    print_info(&format!("Found {} Instagram cookies", cookies.len()));

    report_essential(&cookies);
    ensure_session_cookie(&cookies)?;

    let api = InstagramApi::with_cookies(&cookies)?;
    print_info("Validating session against Instagram...");
    let identity = api.validate_session().await?;
    print_success(&format!("Session valid! Logged in as: {}", identity));

    // Persistence is best-effort: the in-memory session stays usable.
    match session::save(&identity, &cookies) {
        Ok(path) => print_success(&format!("Session saved to {}", path.display())),
        Err(e) => print_warning(&format!("Could not save session file: {}", e)),
    }

    Ok(())
}

fn report_essential(cookies: &HashMap<String, String>) {
    for name in ESSENTIAL_COOKIES {
        if cookies.contains_key(*name) {
            print_info(&format!("  + {}", name));
        } else {
            print_warning(&format!("  - {} (missing)", name));
        }
    }
}

fn ensure_session_cookie(cookies: &HashMap<String, String>) -> Result<()> {
    if !cookies.contains_key(SESSION_COOKIE) {
        return Err(Error::MissingSessionCookie);
    }
    Ok(())
}
