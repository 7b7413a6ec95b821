use std::sync::Once;
use std::time::Duration;

use fitbeat_core::{
    update, AppState, Effect, Msg, ScreenView, SessionSettings, TimerKind, TRANSCRIPT_STEPS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submitted(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::DescriptionChanged("dreamy shoegaze".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

fn step_fired(state: AppState, session: u64, index: usize) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::TimerFired {
            session,
            timer: TimerKind::TranscriptStep(index),
        },
    )
}

#[test]
fn job_creation_schedules_every_step_at_fixed_offsets() {
    init_logging();
    let state = submitted(AppState::new());

    let (state, effects) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-42".to_string(),
        },
    );

    let expected: Vec<Effect> = (0..TRANSCRIPT_STEPS.len())
        .map(|index| Effect::ScheduleTimer {
            session: 1,
            delay: Duration::from_millis(800 * index as u64),
            timer: TimerKind::TranscriptStep(index),
        })
        .collect();
    assert_eq!(effects, expected);
    assert_eq!(state.view().screen, ScreenView::Progress);

    // A duplicate delivery must not schedule the sequence a second time.
    let (next, effects) = update(
        state.clone(),
        Msg::JobCreated {
            session: 1,
            job_id: "job-42".to_string(),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn transcript_plays_in_order_then_polling_begins() {
    init_logging();
    let state = submitted(AppState::new());
    let (mut state, _) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-42".to_string(),
        },
    );

    for index in 0..TRANSCRIPT_STEPS.len() - 1 {
        let (next, effects) = step_fired(state, 1, index);
        assert!(effects.is_empty());
        assert_eq!(next.view().transcript.len(), index + 1);
        assert!(!next.view().awaiting_results);
        state = next;
    }

    // The final entry both completes the transcript and issues the first
    // status request.
    let (state, effects) = step_fired(state, 1, TRANSCRIPT_STEPS.len() - 1);
    assert_eq!(
        effects,
        vec![Effect::RequestStatus {
            session: 1,
            job_id: "job-42".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.transcript, TRANSCRIPT_STEPS.map(String::from).to_vec());
    assert!(view.awaiting_results);
}

#[test]
fn duplicate_step_timer_is_ignored() {
    init_logging();
    let state = submitted(AppState::new());
    let (state, _) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-42".to_string(),
        },
    );

    let (state, _) = step_fired(state, 1, 0);
    let (next, effects) = step_fired(state.clone(), 1, 0);

    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert_eq!(next.view().transcript.len(), 1);
}

#[test]
fn out_of_order_step_timer_is_ignored() {
    init_logging();
    let state = submitted(AppState::new());
    let (state, _) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-42".to_string(),
        },
    );

    let (next, effects) = step_fired(state.clone(), 1, 2);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn disabled_simulation_goes_straight_to_polling() {
    init_logging();
    let settings = SessionSettings {
        simulate_progress: false,
        poll_delay: Duration::from_millis(3000),
        ..SessionSettings::default()
    };
    let state = submitted(AppState::with_settings(settings));

    let (state, effects) = update(
        state,
        Msg::JobCreated {
            session: 1,
            job_id: "job-7".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ScheduleTimer {
            session: 1,
            delay: Duration::from_millis(3000),
            timer: TimerKind::PollDue,
        }]
    );
    let view = state.view();
    assert!(view.transcript.is_empty());
    assert!(view.awaiting_results);
}
