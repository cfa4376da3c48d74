use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Dotted field path such as `ImageState.Version` (a leading `.` is allowed).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(src: &str) -> Result<Self> {
        let trimmed = src.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);

        if body.is_empty() {
            return Err(invalid(src, "empty path"));
        }

        let mut segments = Vec::new();
        for segment in body.split('.') {
            if segment.is_empty() {
                return Err(invalid(src, "empty segment"));
            }
            if let Some(c) = segment
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
            {
                return Err(invalid(src, &format!("unexpected character '{}'", c)));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    /// Column label used in table headers: the path uppercased, dots kept.
    pub fn header_label(&self) -> String {
        self.segments.join(".").to_uppercase()
    }
}

fn invalid(path: &str, reason: &str) -> Error {
    Error::InvalidFieldPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.segments.join("."))
    }
}
