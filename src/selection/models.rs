// Result shapes handed back to callers

use serde::Serialize;
use std::collections::HashMap;

/// How a selected rendition is delivered to the playback client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TrackSource {
    /// Direct resolvable address
    Url { url: String },
    /// Synthesized segmented-media manifest document
    Manifest { manifest: String },
}

/// One accepted video rendition
#[derive(Debug, Clone, Serialize)]
pub struct SelectedVideo {
    #[serde(flatten)]
    pub source: TrackSource,
    pub format_id: String,
    /// Height in pixels, for downstream disambiguation
    pub height: u32,
    /// Whether the rendition carries its own audio
    pub combined: bool,
    pub protocol: String,
}

/// One accepted audio rendition
#[derive(Debug, Clone, Serialize)]
pub struct SelectedAudio {
    #[serde(flatten)]
    pub source: TrackSource,
    pub format_id: String,
    /// Locale tag of the track, empty when the extractor omitted it
    pub language: String,
    pub acodec: String,
    pub protocol: String,
}

/// Caption file chosen for a locale request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCandidate {
    /// Language key the caption map advertised
    pub language: String,
    /// Upstream caption file URL
    pub url: String,
}

/// Assembled selection result for one video
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedVideo {
    pub title: String,
    /// Duration in seconds, 0 for live sources
    pub duration: f64,
    pub thumbnail: String,
    /// Cookie header the extractor negotiated, empty when none
    pub cookies: String,
    pub video: Vec<SelectedVideo>,
    pub audio: Vec<SelectedAudio>,
    /// True when an audio track exists but is a spurious empty track
    pub silent_source: bool,
    /// Per-locale subtitle fetch URLs; empty string when unresolved
    pub subtitles: HashMap<String, String>,
}
