//! Error types for donaform kernel operations.
//!
//! User-input problems never surface here: those are validation messages
//! in a [`crate::ValidationResult`]. These errors cover misuse of the API
//! (bad paths, wrongly typed values) and refused submissions.

/// Errors raised by the form store and the submission controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// A field path does not name anything in the form.
    #[error("invalid field path: {0}")]
    InvalidPath(String),

    /// A path addressed a donation entry past the end of the list.
    #[error("no donation entry at index {index} (list has {len})")]
    EntryOutOfRange { index: usize, len: usize },

    /// A value of the wrong shape was written to a field.
    #[error("field `{path}` expects {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// Submit was requested while validation errors are present.
    #[error("submission refused: form has {error_count} validation error(s)")]
    Invalid { error_count: usize },

    /// Submit was requested while another submission is pending.
    #[error("submission refused: a submission is already in flight")]
    AlreadySubmitting,
}

/// Failure reported by a submit collaborator.
///
/// The controller logs it and returns to idle; it is never surfaced to the
/// caller of [`crate::SubmissionController`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("submit failed: {0}")]
pub struct SubmitError(pub String);
