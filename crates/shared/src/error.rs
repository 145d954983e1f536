use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    InvalidCredentials,
    SessionExpired,
    Busy,
    Transport,
    MalformedResponse,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn requires_reauth(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::Unauthorized | ErrorCode::InvalidCredentials | ErrorCode::SessionExpired
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} tag {tag:?}")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub tag: String,
}

impl UnknownTag {
    pub fn new(kind: &'static str, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
        }
    }
}
