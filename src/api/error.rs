//! Error types for token acquisition and endpoint fetches

use reqwest::StatusCode;

/// Why the client-credentials exchange failed
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("token request rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("token endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Errors that end a run regardless of the caller's error policy
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FetchError::Authentication(_) | FetchError::Output(_) | FetchError::ClientBuild(_)
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, FetchError::Authentication(_))
    }
}
