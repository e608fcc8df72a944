// Selection module - filtering, ordering and packaging of renditions

pub mod config;
pub mod filters;
pub mod manifest;
pub mod models;
pub mod selector;
pub mod sort;
pub mod subtitles;

pub use config::SelectionConfig;
pub use models::{ProcessedVideo, SelectedAudio, SelectedVideo, SubtitleCandidate, TrackSource};
pub use selector::TrackSelector;
