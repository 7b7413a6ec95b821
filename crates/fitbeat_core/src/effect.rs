use std::time::Duration;

use crate::state::{JobId, SessionId};

/// What a fired timer should do. Carried back to `update` inside
/// `Msg::TimerFired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Append the i-th simulated progress line.
    TranscriptStep(usize),
    /// Issue the next status request.
    PollDue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the description to the recommendation service.
    SubmitDescription { session: SessionId, description: String },
    /// GET the status of the given job.
    RequestStatus { session: SessionId, job_id: JobId },
    /// Fire `TimerFired { session, timer }` after `delay`. All timers of one
    /// session share a cancellation handle in the platform layer.
    ScheduleTimer {
        session: SessionId,
        delay: Duration,
        timer: TimerKind,
    },
    /// Cancel every pending timer of the given session.
    CancelTimers { session: SessionId },
}
