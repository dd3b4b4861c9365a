//! The single failure kind a submission can end in.

use thiserror::Error;

/// Any reason a scoring request did not yield a usable response.
///
/// Variants only matter for logs; every one of them surfaces to the user as
/// the same generic alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailed {
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("request did not complete: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

impl RequestFailed {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RequestFailed::Status(status.as_u16())
        } else if err.is_decode() {
            RequestFailed::Decode(err.to_string())
        } else {
            RequestFailed::Network(err.to_string())
        }
    }
}
