use std::fmt;

/// Result type for bossctl-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dotted field path could not be parsed
    InvalidFieldPath { path: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFieldPath { path, reason } => {
                write!(f, "Invalid field path '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
