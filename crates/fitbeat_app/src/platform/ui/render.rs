use fitbeat_core::{AppViewModel, ScreenView, TrackRow};
use serde::Serialize;

/// Wire form of the view model, consumed by `assets/app.js`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ViewDto {
    pub screen: &'static str,
    pub description: String,
    pub submitting: bool,
    pub can_submit: bool,
    pub transcript: Vec<String>,
    pub awaiting_results: bool,
    pub playlist: Vec<TrackDto>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TrackDto {
    pub artist: String,
    pub track: String,
    pub youtube_link: String,
}

pub(crate) fn render(view: &AppViewModel) -> ViewDto {
    ViewDto {
        screen: screen_label(view.screen),
        description: view.description.clone(),
        submitting: view.submitting,
        can_submit: view.can_submit,
        transcript: view.transcript.clone(),
        awaiting_results: view.awaiting_results,
        playlist: view.playlist.iter().map(track_dto).collect(),
        notice: view.notice.clone(),
    }
}

fn screen_label(screen: ScreenView) -> &'static str {
    match screen {
        ScreenView::Request => "request",
        ScreenView::Progress => "progress",
        ScreenView::Playlist => "playlist",
    }
}

fn track_dto(row: &TrackRow) -> TrackDto {
    TrackDto {
        artist: row.artist.clone(),
        track: row.track.clone(),
        youtube_link: row.youtube_link.clone(),
    }
}
