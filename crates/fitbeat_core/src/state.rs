use std::time::Duration;

use crate::view_model::{AppViewModel, ScreenView, TrackRow};

/// Opaque job token issued by the recommendation service. The client only
/// echoes it back in status requests.
pub type JobId = String;

/// Monotonically increasing identifier for one submit/poll cycle. Every
/// asynchronous message is stamped with the session that scheduled it, so a
/// reset invalidates stale timers and responses without any shared flag.
pub type SessionId = u64;

/// Simulated progress lines played back at fixed offsets after job creation.
/// Their content and count are a function of elapsed time only, never of the
/// actual backend state.
pub const TRANSCRIPT_STEPS: [&str; 5] = [
    "\u{1F9E0} Understanding your musical taste...",
    "\u{1F50D} Filtering perfect tracks just for you...",
    "\u{1F50C} Fetching additional song insights...",
    "\u{1F4C8} Ranking tracks by best fit...",
    "\u{1F4CA} Finalizing your personalized playlist...",
];

/// One playlist entry as received from the service. Display order equals
/// receipt order; the sequence is never reordered or filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub track: String,
    pub youtube_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFailure {
    /// The creation request failed; the form is shown again with a notice.
    Submission(String),
    /// The retry budget ran out before the job completed.
    TimedOut,
}

/// Session phase. Leaving `Submitting` exactly once per session is the guard
/// that makes the transcript schedule one-shot even if `JobCreated` is
/// delivered twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Transcript { job_id: JobId, next_step: usize },
    Polling { job_id: JobId, retries_left: u32 },
    Done { playlist: Vec<Track> },
    Failed { failure: SessionFailure },
}

/// Knobs for one submit/poll cycle. `simulate_progress: false` selects the
/// plain variant that skips the transcript and polls on a fixed interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub simulate_progress: bool,
    pub step_delay: Duration,
    pub poll_delay: Duration,
    pub max_retries: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            simulate_progress: true,
            step_delay: Duration::from_millis(800),
            poll_delay: Duration::from_millis(4000),
            max_retries: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: SessionSettings,
    session: SessionId,
    description: String,
    transcript: Vec<&'static str>,
    phase: Phase,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(SessionSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SessionSettings) -> Self {
        Self {
            settings,
            session: 0,
            description: String::new(),
            transcript: Vec::new(),
            phase: Phase::Idle,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Currently active session. Messages stamped with any other value are
    /// ignored by `update`.
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match &self.phase {
            Phase::Idle | Phase::Submitting | Phase::Failed { .. } => ScreenView::Request,
            Phase::Transcript { .. } | Phase::Polling { .. } => ScreenView::Progress,
            Phase::Done { .. } => ScreenView::Playlist,
        };
        let submitting = matches!(self.phase, Phase::Submitting);
        let playlist = match &self.phase {
            Phase::Done { playlist } => playlist
                .iter()
                .map(|track| TrackRow {
                    artist: track.artist.clone(),
                    track: track.track.clone(),
                    youtube_link: track.youtube_link.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };
        let notice = match &self.phase {
            Phase::Failed {
                failure: SessionFailure::Submission(reason),
            } => Some(format!("Something went wrong submitting your request: {reason}")),
            Phase::Failed {
                failure: SessionFailure::TimedOut,
            } => Some("The recommendation service did not finish in time. Please try again.".to_string()),
            _ => None,
        };
        AppViewModel {
            screen,
            description: self.description.clone(),
            submitting,
            can_submit: screen == ScreenView::Request
                && !submitting
                && !self.description.trim().is_empty(),
            transcript: self.transcript.iter().map(|step| step.to_string()).collect(),
            awaiting_results: matches!(self.phase, Phase::Polling { .. }),
            playlist,
            notice,
        }
    }

    /// Returns the dirty flag and clears it. The platform renders only when
    /// this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub(crate) fn set_description(&mut self, text: String) {
        if self.description != text {
            self.description = text;
            self.dirty = true;
        }
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    /// Starts a fresh session, invalidating every message stamped with an
    /// earlier one. Returns the new session id.
    pub(crate) fn begin_submission(&mut self) -> SessionId {
        self.session += 1;
        self.transcript.clear();
        self.phase = Phase::Submitting;
        self.dirty = true;
        self.session
    }

    pub(crate) fn enter_transcript(&mut self, job_id: JobId) {
        self.phase = Phase::Transcript { job_id, next_step: 0 };
        self.dirty = true;
    }

    pub(crate) fn enter_polling(&mut self, job_id: JobId) {
        self.phase = Phase::Polling {
            job_id,
            retries_left: self.settings.max_retries,
        };
        self.dirty = true;
    }

    pub(crate) fn append_transcript_step(&mut self, index: usize) {
        self.transcript.push(TRANSCRIPT_STEPS[index]);
        if let Phase::Transcript { next_step, .. } = &mut self.phase {
            *next_step = index + 1;
        }
        self.dirty = true;
    }

    pub(crate) fn consume_retry(&mut self) -> bool {
        match &mut self.phase {
            Phase::Polling { retries_left, .. } if *retries_left > 0 => {
                *retries_left -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn complete(&mut self, playlist: Vec<Track>) {
        self.phase = Phase::Done { playlist };
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, failure: SessionFailure) {
        self.phase = Phase::Failed { failure };
        self.dirty = true;
    }

    /// Abandons the current session and returns to the request form. The
    /// previous session id is returned so pending timers can be cancelled.
    pub(crate) fn reset(&mut self) -> SessionId {
        let stale = self.session;
        self.session += 1;
        self.transcript.clear();
        self.phase = Phase::Idle;
        self.dirty = true;
        stale
    }
}
