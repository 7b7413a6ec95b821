use std::sync::Once;

use fitbeat_core::{update, AppState, Effect, Msg, ScreenView};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submit(state: AppState, description: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::DescriptionChanged(description.to_string()));
    update(state, Msg::SubmitClicked)
}

#[test]
fn blank_description_is_not_submitted() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = submit(state, "   ");

    assert!(effects.is_empty());
    assert_eq!(next.view().screen, ScreenView::Request);
    assert!(!next.view().can_submit);
}

#[test]
fn submit_emits_exactly_one_creation_request() {
    init_logging();
    let state = AppState::new();

    let (mut next, effects) = submit(state, "upbeat synthwave for late night coding");
    assert_eq!(
        effects,
        vec![Effect::SubmitDescription {
            session: 1,
            description: "upbeat synthwave for late night coding".to_string(),
        }]
    );
    assert!(next.view().submitting);
    assert!(!next.view().can_submit);
    assert!(next.consume_dirty());

    // A second click while the creation request is outstanding is ignored.
    let (mut next, effects) = update(next, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn description_is_trimmed_for_the_request() {
    init_logging();
    let state = AppState::new();

    let (_next, effects) = submit(state, "  mellow acoustic mornings  ");

    assert_eq!(
        effects,
        vec![Effect::SubmitDescription {
            session: 1,
            description: "mellow acoustic mornings".to_string(),
        }]
    );
}

#[test]
fn submission_failure_shows_notice_and_reenables_form() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = submit(state, "rainy day jazz");

    let (mut next, effects) = update(
        state,
        Msg::SubmitFailed {
            session: 1,
            reason: "http status 500".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = next.view();
    assert_eq!(view.screen, ScreenView::Request);
    assert!(!view.submitting);
    assert!(view.can_submit);
    assert!(view.notice.is_some());
    assert!(next.consume_dirty());
}

#[test]
fn stale_submission_failure_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = submit(state, "rainy day jazz");

    let (next, effects) = update(
        state.clone(),
        Msg::SubmitFailed {
            session: 99,
            reason: "network error".to_string(),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn resubmission_after_failure_starts_a_fresh_session() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = submit(state, "rainy day jazz");
    let (state, _effects) = update(
        state,
        Msg::SubmitFailed {
            session: 1,
            reason: "network error".to_string(),
        },
    );

    let (next, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(next.session(), 2);
    assert_eq!(
        effects,
        vec![Effect::SubmitDescription {
            session: 2,
            description: "rainy day jazz".to_string(),
        }]
    );
    assert!(next.view().notice.is_none());
}
