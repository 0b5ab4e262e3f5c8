//! Username extraction from profile URLs or raw handles.

use regex::Regex;

/// Extract a canonical Instagram handle from a profile URL or raw input.
///
/// Tries the profile-URL pattern first, then a bare `@handle` pattern.
/// Falls open to the trimmed input when neither matches, so this never
/// fails on arbitrary strings.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();

    let url_pattern = Regex::new(r"instagram\.com/([^/?]+)").unwrap();
    if let Some(captures) = url_pattern.captures(trimmed) {
        return captures[1].to_string();
    }

    let handle_pattern = Regex::new(r"^@?([a-zA-Z0-9._]+)$").unwrap();
    if let Some(captures) = handle_pattern.captures(trimmed) {
        return captures[1].to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_profile_url() {
        assert_eq!(normalize("https://instagram.com/somebody"), "somebody");
        assert_eq!(normalize("https://www.instagram.com/somebody/"), "somebody");
        assert_eq!(
            normalize("https://www.instagram.com/some.body_/?hl=en"),
            "some.body_"
        );
        assert_eq!(
            normalize("https://instagram.com/somebody/reels/"),
            "somebody"
        );
    }

    #[test]
    fn test_normalize_handle() {
        assert_eq!(normalize("@somebody"), "somebody");
        assert_eq!(normalize("somebody"), "somebody");
        assert_eq!(normalize("  some.body_99  "), "some.body_99");
    }

    #[test]
    fn test_normalize_fail_open() {
        // Neither pattern matches; trimmed input passes through unchanged
        assert_eq!(normalize("  not a handle!  "), "not a handle!");
        assert_eq!(
            normalize("https://example.com/whoever"),
            "https://example.com/whoever"
        );
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["@somebody", "https://instagram.com/somebody", "weird input!"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
