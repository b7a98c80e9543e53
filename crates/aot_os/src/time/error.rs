use thiserror::Error;

/// Text matched none of the accepted date-time profiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{text}` is not a recognized date-time")]
pub struct FormatError {
    /// The offending input, as given.
    pub text: String,
}
