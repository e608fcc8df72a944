// Error types for the selection pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum SelectError {
    /// The extractor output is not a parseable JSON document
    MalformedMetadata(String),

    /// After normalization no video rendition carries a direct URL
    /// or a fragment list
    NoPlayableSource,
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMetadata(msg) => write!(f, "Malformed metadata: {}", msg),
            Self::NoPlayableSource => write!(f, "No playable video source in metadata"),
        }
    }
}

impl std::error::Error for SelectError {}

impl From<serde_json::Error> for SelectError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedMetadata(e.to_string())
    }
}
