//! Error types for generative-AI operations.

use std::time::Duration;

use thiserror::Error;

/// Errors from generative-AI operations.
#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Network error")]
    Network(#[from] reqwest::Error),
    #[error("No image was returned by the model")]
    NoImageProduced,
    #[error("No video was generated")]
    NoVideoProduced,
    #[error("Video operation failed: {0}")]
    OperationFailed(String),
    #[error("Video operation still running after {attempts} checks ({elapsed:?})")]
    PollTimedOut { attempts: u32, elapsed: Duration },
    #[error("Operation cancelled")]
    Cancelled,
}

impl GenAiError {
    /// The call went through but the model produced no usable artifact.
    pub fn is_no_result(&self) -> bool {
        matches!(self, Self::NoImageProduced | Self::NoVideoProduced)
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::ParseFailed(_) | Self::Network(_)
        )
    }
}
