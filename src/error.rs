//! Error types for the reconstruction engine.
//!
//! This module defines the error taxonomy for the pipeline: the small set of
//! conditions that can make per-page reconstruction or document assembly
//! fail outright. Classification ambiguity never produces an error — the
//! Block Classifier, Table Detector, and Math Tokenizer are total functions
//! that always return a label, falling back to `unknown`/`prose` rather than
//! raising.

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the reconstruction engine.
///
/// Propagation policy: per-page errors other than [`Error::PasswordRequired`]
/// and [`Error::PasswordIncorrect`] are recorded against the page (see
/// [`crate::merger::PageFailure`]) and processing continues; password errors
/// are fatal and abort the document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The input glyph stream was empty, or the document has zero pages.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The glyph source adapter reports the document is encrypted and no
    /// password was supplied.
    #[error("a password is required to open this document")]
    PasswordRequired,

    /// The glyph source adapter reports the supplied password was rejected.
    #[error("the supplied password was incorrect")]
    PasswordIncorrect,

    /// OCR was requested (or triggered by near-empty glyph extraction) but
    /// no OCR adapter was configured, or the adapter call failed.
    #[error("OCR was required but unavailable: {0}")]
    OcrUnavailable(String),

    /// A page produced zero [`crate::line::Line`] entries. Not fatal: the
    /// page is emitted as empty Markdown and the condition is recorded as a
    /// page failure.
    #[error("page {0} produced a degenerate layout (no lines)")]
    DegenerateLayout(usize),

    /// Cooperative cancellation was observed between pages or passes.
    #[error("operation cancelled")]
    Cancelled,

    /// An internal invariant was violated. Must not occur in a release
    /// build; indicates a bug in the engine rather than malformed input.
    #[error("internal invariant violation: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to the CLI exit code documented for the reference
    /// `convert` binary.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagedown::error::Error;
    ///
    /// assert_eq!(Error::PasswordRequired.exit_code(), 3);
    /// assert_eq!(Error::PasswordIncorrect.exit_code(), 4);
    /// assert_eq!(Error::OcrUnavailable("no adapter".into()).exit_code(), 5);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInput(_) => 2,
            Error::PasswordRequired => 3,
            Error::PasswordIncorrect => 4,
            Error::OcrUnavailable(_) => 5,
            Error::DegenerateLayout(_) => 1,
            Error::Cancelled => 1,
            Error::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = Error::InvalidInput("zero pages".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("zero pages"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::InvalidInput(String::new()).exit_code(), 2);
        assert_eq!(Error::PasswordRequired.exit_code(), 3);
        assert_eq!(Error::PasswordIncorrect.exit_code(), 4);
        assert_eq!(Error::OcrUnavailable(String::new()).exit_code(), 5);
        assert_eq!(Error::DegenerateLayout(2).exit_code(), 1);
        assert_eq!(Error::Cancelled.exit_code(), 1);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
