/// Which of the three UI surfaces is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenView {
    /// The description form (also shown with a notice after a failure).
    Request,
    /// Transcript playback and/or the waiting line.
    Progress,
    /// The finished playlist table.
    Playlist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: ScreenView,
    pub description: String,
    pub submitting: bool,
    pub can_submit: bool,
    pub transcript: Vec<String>,
    pub awaiting_results: bool,
    pub playlist: Vec<TrackRow>,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub artist: String,
    pub track: String,
    pub youtube_link: String,
}
