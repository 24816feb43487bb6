//! Error types for the open-data API client.

/// Errors that can occur when making API requests.
///
/// Every variant is a transport-level failure. An upstream "not found" is not
/// an error at all: the client turns it into an empty page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent, the body could not be read, or the
    /// body was not the expected JSON shape.
    #[error("Request failed")]
    RequestFailed,
    /// The HTTP client could not be built from the given settings.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    /// The API returned a non-success status other than 404.
    #[error("Request failed with status {status} {status_text}")]
    HttpStatus {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl Error {
    /// True for failures of the transport itself. Kept as a method so callers
    /// can branch on the error kind without matching on variants.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RequestFailed | Error::HttpStatus { .. })
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RequestFailed | Error::ClientBuild(_) => None,
        }
    }
}
