// Selection policy configuration
//
// Every rule table the filters, comparators, selector, manifest synthesizer
// and subtitle resolver consult lives here, instead of module-level
// constants, so callers and tests can substitute policies.

/// Configuration for track selection
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Video codec tags the target hardware decoders cannot play
    pub codec_denylist: Vec<String>,
    /// Protocol substring marking adaptive-playlist delivery
    pub playlist_tag: String,
    /// Protocol substring marking fragmented-manifest delivery
    pub fragment_tag: String,
    /// Protocol substring marking direct-URL delivery
    pub direct_tag: String,
    /// Audio codec substring that fails over direct-URL delivery on some
    /// target hardware
    pub fragile_direct_acodec: String,
    /// Format-id substrings identifying CDN interconnect variants of one
    /// vendor's fragmented formats
    pub interconnect_tags: Vec<String>,
    /// Format-id marker of the separated-audio variant of those formats
    pub split_audio_marker: String,
    /// Height at and above which the frame-rate cap applies
    pub fps_cap_height: u32,
    /// Highest frame rate the reference decoder sustains at that height
    pub fps_cap: f64,
    /// Audio bitrate (kbps) at or below which a track is a spurious
    /// empty track rather than playable audio
    pub silent_abr_ceiling: f64,
    /// Return every eligible audio track instead of only the best one
    pub all_audio_tracks: bool,
    /// Fixed fallback chain appended to every subtitle locale request
    pub english_fallback: Vec<String>,
    /// Caption file extension usable as a flat subtitle file downstream
    pub subtitle_ext: String,
    /// Reference timescale for manifest segment timing, units per second
    pub manifest_timescale: u32,
    /// Placeholder duration in seconds for fragments that omit theirs
    pub default_fragment_duration: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            codec_denylist: vec![
                "av01".to_string(),
                "vp9".to_string(),
                "vp09".to_string(),
            ],
            playlist_tag: "m3u8".to_string(),
            fragment_tag: "dash".to_string(),
            direct_tag: "https".to_string(),
            fragile_direct_acodec: "mp4a".to_string(),
            interconnect_tags: vec!["akfire".to_string(), "fastly".to_string()],
            split_audio_marker: "sep".to_string(),
            fps_cap_height: 1080,
            fps_cap: 30.0,
            silent_abr_ceiling: 10.0,
            all_audio_tracks: false,
            english_fallback: vec![
                "en-US".to_string(),
                "en-GB".to_string(),
                "en".to_string(),
                "en-AU".to_string(),
            ],
            subtitle_ext: "vtt".to_string(),
            manifest_timescale: 48_000,
            default_fragment_duration: 0.01,
        }
    }
}

impl SelectionConfig {
    pub fn with_all_audio_tracks(mut self, enabled: bool) -> Self {
        self.all_audio_tracks = enabled;
        self
    }

    pub fn with_codec_denylist(mut self, denylist: Vec<String>) -> Self {
        self.codec_denylist = denylist;
        self
    }

    pub fn with_english_fallback(mut self, chain: Vec<String>) -> Self {
        self.english_fallback = chain;
        self
    }

    pub fn with_silent_abr_ceiling(mut self, ceiling: f64) -> Self {
        self.silent_abr_ceiling = ceiling;
        self
    }

    pub fn with_fps_cap(mut self, height: u32, fps: f64) -> Self {
        self.fps_cap_height = height;
        self.fps_cap = fps;
        self
    }
}
