use std::sync::Mutex;

use engine_logging::{engine_info, engine_warn};
use fitbeat_core::{Effect, JobStatus, Msg, SessionId, Track};
use fitbeat_engine::{EngineEvent, EngineHandle, JobState, StatusResponse};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Executes the effects the core emits: engine commands go straight out,
/// timers become sleeping tasks sharing one cancellation token per session.
pub(crate) struct EffectRunner {
    msg_tx: mpsc::UnboundedSender<Msg>,
    engine: EngineHandle,
    timers: Mutex<SessionTimers>,
}

struct SessionTimers {
    session: SessionId,
    token: CancellationToken,
}

impl EffectRunner {
    pub(crate) fn new(msg_tx: mpsc::UnboundedSender<Msg>, engine: EngineHandle) -> Self {
        Self {
            msg_tx,
            engine,
            timers: Mutex::new(SessionTimers {
                session: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitDescription {
                    session,
                    description,
                } => {
                    engine_info!(
                        "SubmitDescription session={} description_len={}",
                        session,
                        description.len()
                    );
                    self.engine.create_job(session, description);
                }
                Effect::RequestStatus { session, job_id } => {
                    self.engine.fetch_status(session, job_id);
                }
                Effect::ScheduleTimer {
                    session,
                    delay,
                    timer,
                } => {
                    let token = self.timer_token(session);
                    let msg_tx = self.msg_tx.clone();
                    tokio::spawn(async move {
                        tokio::select! {
                            _ = token.cancelled() => {}
                            _ = tokio::time::sleep(delay) => {
                                let _ = msg_tx.send(Msg::TimerFired { session, timer });
                            }
                        }
                    });
                }
                Effect::CancelTimers { session } => {
                    let mut timers = self.timers.lock().expect("lock timers");
                    if timers.session == session {
                        timers.token.cancel();
                        timers.token = CancellationToken::new();
                    }
                }
            }
        }
    }

    /// Token shared by every timer of one session, so one cancel drops the
    /// whole pending schedule.
    fn timer_token(&self, session: SessionId) -> CancellationToken {
        let mut timers = self.timers.lock().expect("lock timers");
        if timers.session != session {
            timers.session = session;
            timers.token = CancellationToken::new();
        }
        timers.token.clone()
    }
}

/// Forwards engine events into the message channel, translating wire types
/// into core ones.
pub(crate) fn spawn_event_pump(
    mut events: mpsc::UnboundedReceiver<EngineEvent>,
    msg_tx: mpsc::UnboundedSender<Msg>,
) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let msg = match event {
                EngineEvent::JobCreated { session, job_id } => {
                    Msg::JobCreated { session, job_id }
                }
                EngineEvent::SubmitFailed { session, error } => {
                    engine_warn!("Submission for session {} failed: {}", session, error);
                    Msg::SubmitFailed {
                        session,
                        reason: error.to_string(),
                    }
                }
                EngineEvent::StatusFetched { session, response } => Msg::StatusReport {
                    session,
                    status: map_status(response),
                },
                EngineEvent::StatusFailed { session, error } => {
                    engine_warn!("Status request for session {} failed: {}", session, error);
                    Msg::StatusRequestFailed {
                        session,
                        reason: error.to_string(),
                    }
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn map_status(response: StatusResponse) -> JobStatus {
    match response.status {
        JobState::Processing => JobStatus::Processing,
        JobState::Completed => JobStatus::Completed {
            playlist: response
                .playlist
                .unwrap_or_default()
                .into_iter()
                .map(map_track)
                .collect(),
        },
    }
}

fn map_track(track: fitbeat_engine::Track) -> Track {
    Track {
        artist: track.artist,
        track: track.track,
        youtube_link: track.youtube_link,
    }
}
