use crate::{
    AppState, Effect, JobStatus, Msg, Phase, SessionFailure, SessionId, TimerKind, TRANSCRIPT_STEPS,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every asynchronous message carries the session that scheduled it; a stale
/// stamp makes the message a no-op, so nothing a torn-down session scheduled
/// can mutate state.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DescriptionChanged(text) => {
            state.set_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // At most one in-flight creation request; no new submission while
            // a session is still playing out.
            match state.phase() {
                Phase::Idle | Phase::Done { .. } | Phase::Failed { .. } => {}
                Phase::Submitting | Phase::Transcript { .. } | Phase::Polling { .. } => {
                    return (state, Vec::new());
                }
            }
            let description = state.description().trim().to_string();
            if description.is_empty() {
                return (state, Vec::new());
            }
            let session = state.begin_submission();
            vec![Effect::SubmitDescription { session, description }]
        }
        Msg::JobCreated { session, job_id } => {
            // Leaving `Submitting` is one-way per session, so a duplicate
            // delivery schedules nothing a second time.
            if session != state.session() || !matches!(state.phase(), Phase::Submitting) {
                return (state, Vec::new());
            }
            if state.settings().simulate_progress {
                let step_delay = state.settings().step_delay;
                state.enter_transcript(job_id);
                // One (delay, action) pair per line; offsets are strictly
                // increasing, so entries append in schedule order.
                (0..TRANSCRIPT_STEPS.len())
                    .map(|index| Effect::ScheduleTimer {
                        session,
                        delay: step_delay * index as u32,
                        timer: TimerKind::TranscriptStep(index),
                    })
                    .collect()
            } else {
                let poll_delay = state.settings().poll_delay;
                state.enter_polling(job_id);
                vec![Effect::ScheduleTimer {
                    session,
                    delay: poll_delay,
                    timer: TimerKind::PollDue,
                }]
            }
        }
        Msg::SubmitFailed { session, reason } => {
            if session != state.session() || !matches!(state.phase(), Phase::Submitting) {
                return (state, Vec::new());
            }
            state.fail(SessionFailure::Submission(reason));
            Vec::new()
        }
        Msg::TimerFired { session, timer } => {
            if session != state.session() {
                return (state, Vec::new());
            }
            match timer {
                TimerKind::TranscriptStep(index) => {
                    let job_id = match state.phase() {
                        Phase::Transcript { job_id, next_step } if *next_step == index => {
                            job_id.clone()
                        }
                        _ => return (state, Vec::new()),
                    };
                    state.append_transcript_step(index);
                    if index + 1 == TRANSCRIPT_STEPS.len() {
                        // The final line doubles as the first status request.
                        state.enter_polling(job_id.clone());
                        vec![Effect::RequestStatus { session, job_id }]
                    } else {
                        Vec::new()
                    }
                }
                TimerKind::PollDue => match state.phase() {
                    Phase::Polling { job_id, .. } => vec![Effect::RequestStatus {
                        session,
                        job_id: job_id.clone(),
                    }],
                    _ => Vec::new(),
                },
            }
        }
        Msg::StatusReport { session, status } => {
            if session != state.session() || !matches!(state.phase(), Phase::Polling { .. }) {
                return (state, Vec::new());
            }
            match status {
                JobStatus::Completed { playlist } if !playlist.is_empty() => {
                    state.complete(playlist);
                    Vec::new()
                }
                // A completed report without tracks is not ready yet.
                JobStatus::Processing | JobStatus::Completed { .. } => {
                    next_poll(&mut state, session)
                }
            }
        }
        Msg::StatusRequestFailed { session, .. } => {
            if session != state.session() || !matches!(state.phase(), Phase::Polling { .. }) {
                return (state, Vec::new());
            }
            // Same treatment as a not-ready report: no backoff, the budget
            // still counts down.
            next_poll(&mut state, session)
        }
        Msg::ResetClicked => {
            if matches!(state.phase(), Phase::Idle) {
                return (state, Vec::new());
            }
            let stale = state.reset();
            vec![Effect::CancelTimers { session: stale }]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn next_poll(state: &mut AppState, session: SessionId) -> Vec<Effect> {
    if state.consume_retry() {
        vec![Effect::ScheduleTimer {
            session,
            delay: state.settings().poll_delay,
            timer: TimerKind::PollDue,
        }]
    } else {
        state.fail(SessionFailure::TimedOut);
        Vec::new()
    }
}
