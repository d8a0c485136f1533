use thiserror::Error;

/// Fixed user-facing text for transport failures.
pub const CONNECTIVITY_MESSAGE: &str = "Connection error. Please check your internet connection.";

/// Every way a dashboard call can fail, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Missing or malformed input, caught before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The request never reached the server or the response was lost.
    #[error("{0}")]
    Connectivity(String),

    /// The stored token is no longer accepted; the session must end.
    #[error("{0}")]
    SessionInvalid(String),

    /// A success response whose payload does not have the expected shape.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn connectivity() -> Self {
        ClientError::Connectivity(CONNECTIVITY_MESSAGE.to_string())
    }

    /// True for 401/403 responses, which mean the bearer token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Request { status: 401 | 403, .. })
    }

    /// Re-tag an authorization failure as `SessionInvalid`, leaving other errors untouched.
    pub fn into_session_error(self) -> Self {
        if !self.is_unauthorized() {
            return self;
        }
        match self {
            ClientError::Request { message, .. } => ClientError::SessionInvalid(message),
            other => other,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
