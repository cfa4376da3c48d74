use std::fmt;

/// Result type for bossctl-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a result
#[derive(Debug)]
pub enum Error {
    /// Malformed filter clause or regular expression
    FilterSyntax(String),

    /// Malformed order-by specification
    SortSpec(String),

    /// Format string could not be compiled
    TemplateCompile(String),

    /// Template references a field the record type can never have
    FieldResolution(String),

    /// Structured (JSON/YAML) encoding failed
    Encoding(String),

    /// Presentation options that cannot be combined
    InvalidOptions(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FilterSyntax(msg) => write!(f, "Invalid filter: {}", msg),
            Error::SortSpec(msg) => write!(f, "Invalid order: {}", msg),
            Error::TemplateCompile(msg) => write!(f, "Invalid format: {}", msg),
            Error::FieldResolution(msg) => write!(f, "Unknown field: {}", msg),
            Error::Encoding(msg) => write!(f, "Encoding error: {}", msg),
            Error::InvalidOptions(msg) => write!(f, "Invalid options: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
