//! Validation errors for link input

use thiserror::Error;

/// A required field was missing or blank after trimming
///
/// Create and update both check title before url; whichever is missing
/// first is reported. Nothing is mutated when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title and URL are required! (title is empty)")]
    MissingTitle,

    #[error("Title and URL are required! (url is empty)")]
    MissingUrl,
}
