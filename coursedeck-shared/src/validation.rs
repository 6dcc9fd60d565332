//! Validation patterns shared by request DTOs.
//!
//! Request payloads derive [`validator::Validate`]; the regular expressions and
//! custom checks they reference live here so every DTO enforces the same
//! vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Maximum number of tags a course may carry
pub const MAX_COURSE_TAGS: usize = 10;

/// Minimum tag name length
pub const TAG_NAME_MIN: usize = 2;

/// Maximum tag name length
pub const TAG_NAME_MAX: usize = 30;

/// Course skill levels: `beginner|intermediate|advanced`
pub static LEVEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(beginner|intermediate|advanced)$").expect("valid level regex"));

/// Todo statuses on the wire: `todo|progress|completed`
pub static TODO_STATUS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(todo|progress|completed)$").expect("valid todo status regex"));

/// Validates a course tag list
///
/// At most [`MAX_COURSE_TAGS`] entries, each between [`TAG_NAME_MIN`] and
/// [`TAG_NAME_MAX`] characters after trimming.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_COURSE_TAGS {
        let mut err = ValidationError::new("tags_count");
        err.message = Some(format!("At most {} tags are allowed", MAX_COURSE_TAGS).into());
        return Err(err);
    }

    for tag in tags {
        let len = tag.trim().chars().count();
        if !(TAG_NAME_MIN..=TAG_NAME_MAX).contains(&len) {
            let mut err = ValidationError::new("tag_length");
            err.message = Some(
                format!(
                    "Each tag must be {}-{} characters",
                    TAG_NAME_MIN, TAG_NAME_MAX
                )
                .into(),
            );
            err.add_param("tag".into(), tag);
            return Err(err);
        }
    }

    Ok(())
}

/// Strips surrounding whitespace in place
///
/// Request DTOs call this before `validate()` so length limits measure the
/// value that will be stored.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_pattern() {
        assert!(LEVEL_PATTERN.is_match("beginner"));
        assert!(LEVEL_PATTERN.is_match("intermediate"));
        assert!(LEVEL_PATTERN.is_match("advanced"));
        assert!(!LEVEL_PATTERN.is_match("expert"));
        assert!(!LEVEL_PATTERN.is_match("Beginner"));
        assert!(!LEVEL_PATTERN.is_match("beginner "));
    }

    #[test]
    fn test_todo_status_pattern() {
        assert!(TODO_STATUS_PATTERN.is_match("todo"));
        assert!(TODO_STATUS_PATTERN.is_match("progress"));
        assert!(TODO_STATUS_PATTERN.is_match("completed"));
        // Board lane names are not part of the wire vocabulary
        assert!(!TODO_STATUS_PATTERN.is_match("doing"));
        assert!(!TODO_STATUS_PATTERN.is_match("done"));
    }

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&["rust".to_string(), "web".to_string()]).is_ok());

        let err = validate_tags(&["x".to_string()]).unwrap_err();
        assert_eq!(err.code, "tag_length");

        let too_many: Vec<String> = (0..11).map(|i| format!("tag{}", i)).collect();
        let err = validate_tags(&too_many).unwrap_err();
        assert_eq!(err.code, "tags_count");
    }

    #[test]
    fn test_trim_in_place() {
        let mut value = "  ab \t".to_string();
        trim_in_place(&mut value);
        assert_eq!(value, "ab");

        let mut blank = "   ".to_string();
        trim_in_place(&mut blank);
        assert!(blank.is_empty());

        let mut clean = "rust".to_string();
        trim_in_place(&mut clean);
        assert_eq!(clean, "rust");
    }
}
