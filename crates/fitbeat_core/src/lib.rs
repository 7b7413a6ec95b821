//! FitBeat core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, TimerKind};
pub use msg::{JobStatus, Msg};
pub use state::{
    AppState, JobId, Phase, SessionFailure, SessionId, SessionSettings, Track, TRANSCRIPT_STEPS,
};
pub use update::update;
pub use view_model::{AppViewModel, ScreenView, TrackRow};
