use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Token identifying one submit/poll cycle in the caller's state machine.
/// The engine only echoes it back in events.
pub type SessionId = u64;

/// One playlist entry as the service serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub artist: String,
    pub track: String,
    pub youtube_link: String,
}

/// Lifecycle of a recommendation job as observed over the wire. The service
/// reports `processing` until the single transition to `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Processing,
    Completed,
}

/// Body of `GET /status/{job_id}`. The playlist is only present once the job
/// has completed, and may still be absent on a completed report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub status: JobState,
    #[serde(default)]
    pub playlist: Option<Vec<Track>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    InvalidBaseUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::InvalidBaseUrl => write!(f, "invalid base url"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::Network => write!(f, "network error"),
            ApiFailure::Decode => write!(f, "decode error"),
        }
    }
}

/// Outcome of an engine command, stamped with the session that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobCreated {
        session: SessionId,
        job_id: String,
    },
    SubmitFailed {
        session: SessionId,
        error: ApiError,
    },
    StatusFetched {
        session: SessionId,
        response: StatusResponse,
    },
    StatusFailed {
        session: SessionId,
        error: ApiError,
    },
}
