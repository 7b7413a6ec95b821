use crate::effect::TimerKind;
use crate::state::{JobId, SessionId, Track};

/// Status reported by the recommendation service for one job. A completed
/// report with an empty playlist is treated as not ready yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Processing,
    Completed { playlist: Vec<Track> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the description input box.
    DescriptionChanged(String),
    /// User asked for a playlist matching the current description.
    SubmitClicked,
    /// The creation request succeeded and the service issued a job token.
    JobCreated { session: SessionId, job_id: JobId },
    /// The creation request failed (network, HTTP, or decode error).
    SubmitFailed { session: SessionId, reason: String },
    /// A previously scheduled timer elapsed.
    TimerFired { session: SessionId, timer: TimerKind },
    /// A status request completed with the given report.
    StatusReport { session: SessionId, status: JobStatus },
    /// A status request failed; the poll loop carries on.
    StatusRequestFailed { session: SessionId, reason: String },
    /// User clicked "Create Another Playlist" (or navigated away).
    ResetClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
