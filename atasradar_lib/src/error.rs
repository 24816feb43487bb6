//! Error types for the library layer.

use std::fmt;

use crate::genai::GenAiError;
use crate::resource::LoadError;

/// Errors produced by the library layer, wrapping the open-data client and
/// generative-AI client errors and adding input validation and I/O failures.
#[derive(Debug)]
pub enum AtasRadarError {
    /// An error from the open-data API client.
    Api(comprasgov_api::Error),
    /// An error from the generative-AI client.
    GenAi(GenAiError),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Reading a local file failed.
    Io(std::io::Error),
    /// The view was torn down while the request was in flight.
    Cancelled,
}

impl AtasRadarError {
    /// True when the remote call succeeded but produced nothing usable.
    pub fn is_no_result(&self) -> bool {
        matches!(self, Self::GenAi(e) if e.is_no_result())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::GenAi(GenAiError::Cancelled))
    }
}

impl fmt::Display for AtasRadarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::GenAi(e) => write!(f, "AI error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::error::Error for AtasRadarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::GenAi(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidInput(_) | Self::Cancelled => None,
        }
    }
}

impl From<comprasgov_api::Error> for AtasRadarError {
    fn from(e: comprasgov_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<GenAiError> for AtasRadarError {
    fn from(e: GenAiError) -> Self {
        Self::GenAi(e)
    }
}

impl From<std::io::Error> for AtasRadarError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl<E: Into<AtasRadarError>> From<LoadError<E>> for AtasRadarError {
    fn from(e: LoadError<E>) -> Self {
        match e {
            LoadError::Failed(inner) => inner.into(),
            LoadError::Cancelled => Self::Cancelled,
        }
    }
}
