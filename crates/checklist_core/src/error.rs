use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

use crate::credentials::CredentialStoreError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("unauthorized: {path} rejected the session")]
    Unauthorized { path: String },
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("session expired; sign in again")]
    SessionExpired,
    #[error("a submission is already in progress")]
    Busy,
    #[error("malformed response from {path}: {reason}")]
    MalformedResponse { path: String, reason: String },
    #[error("invalid service url {url:?}: {reason}")]
    InvalidServiceUrl { url: String, reason: String },
    #[error("checklist was submitted but reloading it failed: {0}")]
    ReloadAfterSubmit(Box<ClientError>),
    #[error(transparent)]
    CredentialStore(#[from] CredentialStoreError),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } | Self::Status { .. } => ErrorCode::Transport,
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::SessionExpired => ErrorCode::SessionExpired,
            Self::Busy => ErrorCode::Busy,
            Self::MalformedResponse { .. } => ErrorCode::MalformedResponse,
            Self::InvalidServiceUrl { .. } | Self::CredentialStore(_) => ErrorCode::Internal,
            Self::ReloadAfterSubmit(inner) => inner.code(),
        }
    }

    pub fn requires_reauth(&self) -> bool {
        self.api_error().requires_reauth()
    }

    pub fn api_error(&self) -> ApiError {
        ApiError::new(self.code(), self.to_string())
    }
}

impl From<&ClientError> for ApiError {
    fn from(value: &ClientError) -> Self {
        value.api_error()
    }
}
