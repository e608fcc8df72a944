// Format Record Normalizer - typed view over raw extractor output
//
// The extractor dumps one JSON document per video. Everything downstream
// (filters, comparators, selector) works on the typed records parsed here.
// Missing optional fields default to empty string / zero, never None
// propagation into later stages.

use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::SelectError;

/// One candidate rendition advertised by the extractor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatRecord {
    /// Opaque unique identifier ("source" and http-prefixed ids are synthetic)
    #[serde(default)]
    pub format_id: String,
    /// Container extension hint (mp4, webm, m4a)
    #[serde(default)]
    pub ext: String,
    /// Video height in pixels
    pub height: Option<u32>,
    /// Frames per second
    pub fps: Option<f64>,
    /// Total bitrate in kbps
    pub tbr: Option<f64>,
    /// Audio bitrate in kbps
    pub abr: Option<f64>,
    /// Video codec tag ("none" means no visual payload)
    pub vcodec: Option<String>,
    /// Audio codec tag ("none" means no audio payload)
    pub acodec: Option<String>,
    /// Delivery mechanism tag (free-form: https, m3u8_native, http_dash_segments, ...)
    #[serde(default)]
    pub protocol: String,
    /// Direct resolvable address, present when not fragment-delivered
    pub url: Option<String>,
    /// Audio locale tag, free-form case
    pub language: Option<String>,
    /// Audio container hint ("none" for video-only records)
    pub audio_ext: Option<String>,
    /// Ordered fragment list; presence signals fragment delivery
    pub fragments: Option<Vec<Fragment>>,
    /// Base URL the fragment paths resolve against
    pub fragment_base_url: Option<String>,
}

impl FormatRecord {
    /// Height with absent treated as 0
    pub fn height(&self) -> u32 {
        self.height.unwrap_or(0)
    }

    /// Frame rate with absent treated as 0
    pub fn fps(&self) -> f64 {
        self.fps.unwrap_or(0.0)
    }

    /// Total bitrate with absent treated as 0
    pub fn tbr(&self) -> f64 {
        self.tbr.unwrap_or(0.0)
    }

    /// Audio bitrate with absent treated as 0
    pub fn abr(&self) -> f64 {
        self.abr.unwrap_or(0.0)
    }

    /// Check for a non-selectable synthetic entry
    pub fn is_synthetic(&self) -> bool {
        self.format_id == "source" || self.format_id.starts_with("http")
    }

    /// Check if the record carries a visual payload
    pub fn has_video(&self) -> bool {
        self.vcodec
            .as_deref()
            .map_or(false, |v| v != "none" && !v.is_empty())
    }

    /// Check if the audio dimension is explicitly marked absent
    pub fn is_video_only(&self) -> bool {
        self.acodec.as_deref() == Some("none")
    }

    /// Check if the record is delivered as discrete fragments
    pub fn is_fragmented(&self) -> bool {
        self.fragments.as_ref().map_or(false, |f| !f.is_empty())
    }
}

/// One fragment of a fragment-delivered rendition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fragment {
    /// Path relative to the record's fragment base URL
    pub path: Option<String>,
    /// Absolute fragment URL (some extractor variants emit this instead)
    pub url: Option<String>,
    /// Fragment duration in seconds
    pub duration: Option<f64>,
}

impl Fragment {
    /// Address of the fragment, preferring the relative path form
    pub fn location(&self) -> &str {
        self.path
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or("")
    }
}

/// One caption file advertised for a language key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptionFile {
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub protocol: String,
}

/// Normalized view of one extractor invocation's output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Total duration in seconds; absent for live sources
    pub duration: Option<f64>,
    #[serde(default)]
    pub http_headers: HashMap<String, String>,
    #[serde(default)]
    pub formats: Vec<FormatRecord>,
    /// Manually authored caption tracks, keyed by language tag
    #[serde(default)]
    pub subtitles: HashMap<String, Vec<CaptionFile>>,
    /// Machine-generated caption tracks, keyed by language tag
    #[serde(default)]
    pub automatic_captions: HashMap<String, Vec<CaptionFile>>,
}

impl VideoMetadata {
    pub fn title(&self) -> String {
        self.title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn thumbnail(&self) -> String {
        self.thumbnail.clone().unwrap_or_default()
    }

    /// Duration in seconds, 0 when absent (live source)
    pub fn duration(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Cookie header the extractor negotiated, empty when none
    pub fn cookies(&self) -> String {
        self.http_headers.get("Cookie").cloned().unwrap_or_default()
    }
}

/// Parse the extractor's complete buffered output into typed records
pub fn parse_metadata(raw: &str) -> Result<VideoMetadata, SelectError> {
    let metadata: VideoMetadata = serde_json::from_str(raw.trim())?;
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let raw = r#"{
            "title": "Test Video",
            "duration": 123.4,
            "thumbnail": "https://example.com/thumb.jpg",
            "http_headers": {"Cookie": "a=b"},
            "formats": [
                {"format_id": "22", "ext": "mp4", "height": 720, "vcodec": "avc1", "acodec": "mp4a.40.2", "protocol": "https", "url": "https://example.com/v"}
            ]
        }"#;

        let meta = parse_metadata(raw).unwrap();
        assert_eq!(meta.title(), "Test Video");
        assert_eq!(meta.duration(), 123.4);
        assert_eq!(meta.cookies(), "a=b");
        assert_eq!(meta.formats.len(), 1);
        assert_eq!(meta.formats[0].height(), 720);
        assert!(meta.formats[0].has_video());
        assert!(!meta.formats[0].is_video_only());
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let meta = parse_metadata(r#"{"formats": [{"format_id": "hls-1"}]}"#).unwrap();
        assert_eq!(meta.title(), "Unknown");
        assert_eq!(meta.thumbnail(), "");
        assert_eq!(meta.duration(), 0.0);
        assert_eq!(meta.cookies(), "");

        let f = &meta.formats[0];
        assert_eq!(f.height(), 0);
        assert_eq!(f.tbr(), 0.0);
        assert!(!f.has_video());
        assert!(!f.is_fragmented());
    }

    #[test]
    fn null_numerics_are_absent_not_errors() {
        let meta = parse_metadata(
            r#"{"duration": null, "formats": [{"format_id": "x", "height": null, "tbr": null}]}"#,
        )
        .unwrap();
        assert_eq!(meta.duration(), 0.0);
        assert_eq!(meta.formats[0].height(), 0);
    }

    #[test]
    fn malformed_input_is_a_typed_error() {
        let err = parse_metadata("not json at all").unwrap_err();
        assert!(matches!(err, SelectError::MalformedMetadata(_)));
    }

    #[test]
    fn synthetic_ids_are_flagged() {
        let source = FormatRecord {
            format_id: "source".to_string(),
            ..Default::default()
        };
        let http = FormatRecord {
            format_id: "http-720p-0".to_string(),
            ..Default::default()
        };
        let normal = FormatRecord {
            format_id: "22".to_string(),
            ..Default::default()
        };
        assert!(source.is_synthetic());
        assert!(http.is_synthetic());
        assert!(!normal.is_synthetic());
    }
}
