//! Validation for timestamped annotations.
//!
//! An annotation marks the interval `[start, end]` of a video. Both ends are
//! [`TimeStamp`]s, which decode permissively, so the bounds are enforced here
//! against the owning video's duration.

use crate::error::CoreError;
use crate::timestamp::TimeStamp;

/// Maximum length of an annotation or video title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of free-form annotation notes.
pub const MAX_NOTES_LENGTH: usize = 10_000;

/// Validate an annotation interval against the duration of its video.
///
/// Requires `0 <= start <= end <= duration`. A zero-length interval marks a
/// single instant and is accepted.
pub fn validate_interval(
    start: TimeStamp,
    end: TimeStamp,
    duration: TimeStamp,
) -> Result<(), CoreError> {
    if start < TimeStamp::ZERO {
        return Err(CoreError::Validation(format!(
            "Annotation start must not be negative, got {start}"
        )));
    }
    if end < TimeStamp::ZERO {
        return Err(CoreError::Validation(format!(
            "Annotation end must not be negative, got {end}"
        )));
    }
    if start > end {
        return Err(CoreError::Validation(format!(
            "Annotation start {start} is after its end {end}"
        )));
    }
    if end > duration {
        return Err(CoreError::Validation(format!(
            "Annotation end {end} exceeds the video duration {duration}"
        )));
    }
    Ok(())
}

/// Validate a title: must not be blank and must fit [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate annotation notes length.
pub fn validate_notes(notes: &str) -> Result<(), CoreError> {
    if notes.chars().count() > MAX_NOTES_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notes exceed maximum length of {MAX_NOTES_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> TimeStamp {
        TimeStamp::from_secs(secs)
    }

    // -- validate_interval --------------------------------------------------

    #[test]
    fn interval_inside_video_accepted() {
        assert!(validate_interval(ts(10), ts(20), ts(600)).is_ok());
    }

    #[test]
    fn interval_covering_whole_video_accepted() {
        assert!(validate_interval(ts(0), ts(600), ts(600)).is_ok());
    }

    #[test]
    fn instant_accepted() {
        assert!(validate_interval(ts(42), ts(42), ts(600)).is_ok());
    }

    #[test]
    fn negative_start_rejected() {
        let err = validate_interval(ts(-1), ts(20), ts(600)).unwrap_err();
        assert!(err.to_string().contains("start must not be negative"));
    }

    #[test]
    fn negative_end_rejected() {
        let err = validate_interval(ts(-10), ts(-1), ts(600)).unwrap_err();
        assert!(err.to_string().contains("start must not be negative"));

        let err = validate_interval(ts(0), ts(-1), ts(600)).unwrap_err();
        assert!(err.to_string().contains("end must not be negative"));
    }

    #[test]
    fn reversed_interval_rejected() {
        let err = validate_interval(ts(30), ts(20), ts(600)).unwrap_err();
        assert!(err.to_string().contains("00:00:30 is after its end 00:00:20"));
    }

    #[test]
    fn end_past_duration_rejected() {
        let err = validate_interval(ts(0), ts(601), ts(600)).unwrap_err();
        assert!(err.to_string().contains("exceeds the video duration 00:10:00"));
    }

    // -- validate_title / validate_notes ------------------------------------

    #[test]
    fn title_accepted() {
        assert!(validate_title("Opening scene").is_ok());
    }

    #[test]
    fn blank_title_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn long_title_rejected() {
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn notes_limits() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes(&"n".repeat(MAX_NOTES_LENGTH + 1)).is_err());
    }
}
