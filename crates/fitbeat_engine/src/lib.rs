//! FitBeat engine: remote recommender API client and command execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, RecommenderApi, ReqwestRecommender};
pub use engine::EngineHandle;
pub use types::{ApiError, ApiFailure, EngineEvent, JobState, SessionId, StatusResponse, Track};
