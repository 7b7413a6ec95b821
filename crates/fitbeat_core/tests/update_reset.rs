use std::sync::Once;
use std::time::Duration;

use fitbeat_core::{
    update, AppState, Effect, JobStatus, Msg, ScreenView, SessionSettings, TimerKind, Track,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn polling_state() -> AppState {
    let settings = SessionSettings {
        simulate_progress: false,
        poll_delay: Duration::from_millis(3000),
        ..SessionSettings::default()
    };
    let state = AppState::with_settings(settings);
    let (state, _) = update(state, Msg::DescriptionChanged("post-rock".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-1".to_string(),
        },
    );
    state
}

#[test]
fn reset_in_idle_is_a_noop() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = update(state.clone(), Msg::ResetClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn reset_during_polling_cancels_timers_and_returns_to_form() {
    init_logging();
    let state = polling_state();

    let (state, effects) = update(state, Msg::ResetClicked);

    assert_eq!(effects, vec![Effect::CancelTimers { session: 1 }]);
    assert_eq!(state.session(), 2);
    let view = state.view();
    assert_eq!(view.screen, ScreenView::Request);
    assert!(view.transcript.is_empty());
    assert!(view.playlist.is_empty());
    assert!(view.notice.is_none());
}

#[test]
fn stale_messages_after_reset_mutate_nothing() {
    init_logging();
    let state = polling_state();
    let (state, _) = update(state, Msg::ResetClicked);

    // A timer scheduled by the abandoned session fires anyway.
    let (next, effects) = update(
        state.clone(),
        Msg::TimerFired {
            session: 1,
            timer: TimerKind::PollDue,
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());

    // So does a status response that was already in flight.
    let (next, effects) = update(
        state.clone(),
        Msg::StatusReport {
            session: 1,
            status: JobStatus::Completed {
                playlist: vec![Track {
                    artist: "A".to_string(),
                    track: "T".to_string(),
                    youtube_link: "https://y/1".to_string(),
                }],
            },
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(next.view().playlist.is_empty());
}

#[test]
fn reset_from_done_clears_the_playlist() {
    init_logging();
    let state = polling_state();
    let (state, _) = update(
        state,
        Msg::TimerFired {
            session: 1,
            timer: TimerKind::PollDue,
        },
    );
    let (state, _) = update(
        state,
        Msg::StatusReport {
            session: 1,
            status: JobStatus::Completed {
                playlist: vec![Track {
                    artist: "A".to_string(),
                    track: "T".to_string(),
                    youtube_link: "https://y/1".to_string(),
                }],
            },
        },
    );
    assert_eq!(state.view().screen, ScreenView::Playlist);

    let (state, effects) = update(state, Msg::ResetClicked);

    assert_eq!(effects, vec![Effect::CancelTimers { session: 1 }]);
    let view = state.view();
    assert_eq!(view.screen, ScreenView::Request);
    assert!(view.playlist.is_empty());
    // The description survives a reset so the user can tweak and resubmit.
    assert_eq!(view.description, "post-rock");
}
