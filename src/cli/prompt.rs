//! Interactive prompts for values not supplied on the command line.

use dialoguer::Input;

use crate::error::Result;

/// Default number of images to download when the count prompt is left
/// empty or unparseable.
pub const DEFAULT_IMAGE_COUNT: usize = 100;

/// Ask for a profile URL or username unless one was already given.
pub fn username(preset: Option<String>) -> Result<String> {
    if let Some(user) = preset {
        return Ok(user);
    }

    let input: String = Input::new()
        .with_prompt("Instagram profile URL or username")
        .interact_text()?;
    Ok(input)
}

/// Ask for the number of images to download unless one was already given.
///
/// Empty or invalid input falls back to [`DEFAULT_IMAGE_COUNT`].
pub fn image_count(preset: Option<usize>) -> Result<usize> {
    if let Some(count) = preset {
        return Ok(count);
    }

    let input: String = Input::new()
        .with_prompt(format!(
            "Number of images to download (default: {})",
            DEFAULT_IMAGE_COUNT
        ))
        .allow_empty(true)
        .interact_text()?;

    Ok(parse_count(&input))
}

/// Block until the user confirms by pressing Enter.
pub fn pause(message: &str) -> Result<()> {
    let _: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

fn parse_count(input: &str) -> usize {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_IMAGE_COUNT;
    }
    trimmed.parse().unwrap_or(DEFAULT_IMAGE_COUNT)
}
