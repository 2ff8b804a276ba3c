//! Editor error taxonomy

use thiserror::Error;

/// Recoverable failure of an editor operation.
///
/// None of these are fatal: the editor logs them and either leaves its state
/// untouched or falls back to the nearest safe state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Bad user input (custom dimensions, joint thickness, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Element height unusable for a course
    #[error("invalid element height: {0} cm")]
    InvalidHeight(f64),
    /// Element type without usable dimensions
    #[error("invalid element type: {0}")]
    InvalidType(String),
    /// Operation requested outside its valid tool/sub-state
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Stale or missing element/course id
    #[error("not found: {0}")]
    NotFound(String),
    /// A course with (almost) the same height already exists
    #[error("a course of height {0:.1} cm already exists")]
    DuplicateCourse(f64),
    /// Click did not hit the ground or a placed element
    #[error("no valid surface under the pointer")]
    NoSurface,
    /// Layout file could not be read or written
    #[error("layout file error: {0}")]
    Io(String),
}

impl EditorError {
    /// Whether this failure is surfaced to the user as a notification
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            EditorError::InvalidInput(_)
                | EditorError::InvalidHeight(_)
                | EditorError::InvalidType(_)
                | EditorError::DuplicateCourse(_)
                | EditorError::NoSurface
                | EditorError::Io(_)
        )
    }
}

pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_split() {
        assert!(EditorError::DuplicateCourse(6.2).is_user_visible());
        assert!(EditorError::NoSurface.is_user_visible());
        assert!(EditorError::InvalidInput("w".into()).is_user_visible());
        assert!(!EditorError::InvalidState("confirm".into()).is_user_visible());
        assert!(!EditorError::NotFound("element 4".into()).is_user_visible());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            EditorError::DuplicateCourse(6.2).to_string(),
            "a course of height 6.2 cm already exists"
        );
    }
}
