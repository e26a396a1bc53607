//! Validation for catalogued videos.

use crate::error::CoreError;
use crate::timestamp::TimeStamp;

/// Maximum length of a video link.
pub const MAX_LINK_LENGTH: usize = 2048;

/// Validate a video duration: it must be strictly positive.
pub fn validate_duration(duration: TimeStamp) -> Result<(), CoreError> {
    if duration <= TimeStamp::ZERO {
        return Err(CoreError::Validation(format!(
            "Video duration must be positive, got {duration}"
        )));
    }
    Ok(())
}

/// Validate a video link: must not be blank and must fit [`MAX_LINK_LENGTH`].
pub fn validate_link(link: &str) -> Result<(), CoreError> {
    if link.trim().is_empty() {
        return Err(CoreError::Validation("Link must not be empty".to_string()));
    }
    if link.len() > MAX_LINK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Link exceeds maximum length of {MAX_LINK_LENGTH} characters"
        )));
    }
    Ok(())
}
