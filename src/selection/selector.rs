// Track Selector - per-tier rendition choice over filtered candidates
//
// Applies the capability filters and deterministic comparators to pick
// one-or-many renditions per quality tier, branching on live vs recorded
// content:
// - Live: the best combined (audio+video) candidate per tier. Live sources
//   deliver every rendition through the adaptive-playlist family uniformly,
//   so split tracks are never attempted.
// - VOD: the best combined candidate and, independently, the best
//   video-only candidate per tier; the playback client prefers split
//   delivery and falls back to combined.
//
// Audio runs independently of tier over the full format list.

use crate::errors::SelectError;
use crate::metadata::FormatRecord;
use crate::selection::config::SelectionConfig;
use crate::selection::filters::{is_eligible_audio, is_eligible_video};
use crate::selection::manifest::{build_manifest, MediaRole};
use crate::selection::models::{SelectedAudio, SelectedVideo, TrackSource};
use crate::selection::sort::{audio_order, video_order};

// Quality tiers as inclusive height ranges: >1080p, >720p..=1080p, <=720p.
// Records without a height land in the lowest tier.
const QUALITY_TIERS: [(u32, u32); 3] = [(1081, u32::MAX), (721, 1080), (0, 720)];

pub struct TrackSelector {
    config: SelectionConfig,
}

impl TrackSelector {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select video renditions per quality tier.
    ///
    /// `duration` of 0 marks a live source. Absent tier cells are dropped;
    /// an empty overall result is a `NoPlayableSource` failure.
    pub fn select_video(
        &self,
        formats: &[FormatRecord],
        duration: f64,
    ) -> Result<Vec<SelectedVideo>, SelectError> {
        let config = &self.config;
        let mut candidates: Vec<&FormatRecord> = formats
            .iter()
            .filter(|f| is_eligible_video(config, f))
            .collect();
        candidates.sort_by(|a, b| video_order(config, a, b));

        let live = duration <= 0.0;
        let mut picks: Vec<&FormatRecord> = Vec::new();
        for (low, high) in QUALITY_TIERS {
            let in_tier =
                |f: &FormatRecord| -> bool { f.height() >= low && f.height() <= high };

            if let Some(combined) = candidates
                .iter()
                .copied()
                .find(|f| in_tier(f) && !f.is_video_only())
            {
                picks.push(combined);
            }
            if !live {
                if let Some(split) = candidates
                    .iter()
                    .copied()
                    .find(|f| in_tier(f) && f.is_video_only())
                {
                    picks.push(split);
                }
            }
        }

        let mut selected = Vec::new();
        for record in picks {
            // A pick without a URL or fragments cannot be delivered; skip it
            // rather than let one malformed record abort the set
            if let Some(source) = self.wrap(record, duration, MediaRole::Video) {
                selected.push(SelectedVideo {
                    source,
                    format_id: record.format_id.clone(),
                    height: record.height(),
                    combined: !record.is_video_only(),
                    protocol: record.protocol.clone(),
                });
            }
        }

        if selected.is_empty() {
            return Err(SelectError::NoPlayableSource);
        }
        Ok(selected)
    }

    /// Select audio tracks independently of tier.
    ///
    /// Returns the chosen tracks and a silent-source flag. A best candidate
    /// whose known bitrate is at or below the silent ceiling is a spurious
    /// empty track: it is suppressed and the source flagged silent instead
    /// of surfaced as playable. No eligible track at all is a valid empty
    /// result, not an error.
    pub fn select_audio(
        &self,
        formats: &[FormatRecord],
        duration: f64,
    ) -> (Vec<SelectedAudio>, bool) {
        let config = &self.config;
        let strict = !config.all_audio_tracks;
        let mut candidates: Vec<&FormatRecord> = formats
            .iter()
            .filter(|f| is_eligible_audio(config, f, strict))
            .collect();
        candidates.sort_by(|a, b| audio_order(config, a, b));

        let best = match candidates.first() {
            Some(best) => best,
            None => return (Vec::new(), false),
        };
        if let Some(abr) = best.abr {
            if abr <= config.silent_abr_ceiling {
                return (Vec::new(), true);
            }
        }

        let take = if config.all_audio_tracks {
            candidates.len()
        } else {
            1
        };
        let mut selected = Vec::new();
        for record in candidates.into_iter().take(take) {
            if let Some(source) = self.wrap(record, duration, MediaRole::Audio) {
                selected.push(SelectedAudio {
                    source,
                    format_id: record.format_id.clone(),
                    language: record.language.clone().unwrap_or_default(),
                    acodec: record.acodec.clone().unwrap_or_default(),
                    protocol: record.protocol.clone(),
                });
            }
        }
        (selected, false)
    }

    /// Wrap a record into its delivery variant, synthesizing a manifest for
    /// fragment delivery
    fn wrap(&self, record: &FormatRecord, duration: f64, role: MediaRole) -> Option<TrackSource> {
        if record.is_fragmented() {
            let manifest = build_manifest(record, duration, role, &self.config);
            return Some(TrackSource::Manifest { manifest });
        }
        record
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| TrackSource::Url { url: u.to_string() })
    }
}

impl Default for TrackSelector {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Fragment;

    fn video(
        format_id: &str,
        height: u32,
        fps: f64,
        acodec: &str,
        protocol: &str,
        tbr: f64,
    ) -> FormatRecord {
        FormatRecord {
            format_id: format_id.to_string(),
            ext: "mp4".to_string(),
            height: Some(height),
            fps: Some(fps),
            tbr: Some(tbr),
            vcodec: Some("avc1.4d401f".to_string()),
            acodec: Some(acodec.to_string()),
            protocol: protocol.to_string(),
            url: Some(format!("https://cdn.example.com/{}", format_id)),
            ..Default::default()
        }
    }

    fn audio(format_id: &str, acodec: &str, protocol: &str, abr: Option<f64>) -> FormatRecord {
        FormatRecord {
            format_id: format_id.to_string(),
            ext: "m4a".to_string(),
            acodec: Some(acodec.to_string()),
            protocol: protocol.to_string(),
            abr,
            url: Some(format!("https://cdn.example.com/{}", format_id)),
            ..Default::default()
        }
    }

    #[test]
    fn vod_selects_combined_and_split_per_tier() {
        let selector = TrackSelector::default();
        let formats = vec![
            video("combined-1080", 1080, 30.0, "mp4a.40.2", "https", 2000.0),
            video("split-1080", 1080, 30.0, "none", "http_dash_segments", 2500.0),
            video("combined-720", 720, 30.0, "mp4a.40.2", "https", 1200.0),
            video("split-720", 720, 30.0, "none", "http_dash_segments", 1500.0),
        ];

        let selected = selector.select_video(&formats, 300.0).unwrap();
        let ids: Vec<&str> = selected.iter().map(|v| v.format_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["combined-1080", "split-1080", "combined-720", "split-720"]
        );
        assert!(selected[0].combined);
        assert!(!selected[1].combined);
    }

    #[test]
    fn live_never_attempts_split_tracks() {
        let selector = TrackSelector::default();
        let formats = vec![
            video("combined-1080", 1080, 30.0, "mp4a.40.2", "m3u8_native", 2000.0),
            video("split-1080", 1080, 30.0, "none", "m3u8_native", 2500.0),
            video("combined-720", 720, 30.0, "mp4a.40.2", "m3u8_native", 1200.0),
        ];

        let selected = selector.select_video(&formats, 0.0).unwrap();
        let ids: Vec<&str> = selected.iter().map(|v| v.format_id.as_str()).collect();
        assert_eq!(ids, vec!["combined-1080", "combined-720"]);
        assert!(selected.iter().all(|v| v.combined));
    }

    #[test]
    fn absent_tiers_are_dropped_not_padded() {
        let selector = TrackSelector::default();
        let formats = vec![video("combined-480", 480, 30.0, "mp4a.40.2", "https", 800.0)];
        let selected = selector.select_video(&formats, 300.0).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].format_id, "combined-480");
    }

    #[test]
    fn no_eligible_video_is_no_playable_source() {
        let selector = TrackSelector::default();
        let formats = vec![
            video("vp9-only", 1080, 30.0, "mp4a.40.2", "https", 2000.0),
            audio("140", "mp4a.40.2", "m3u8", Some(128.0)),
        ];
        let mut formats = formats;
        formats[0].vcodec = Some("vp9".to_string());

        let err = selector.select_video(&formats, 300.0).unwrap_err();
        assert!(matches!(err, SelectError::NoPlayableSource));
    }

    #[test]
    fn fragmented_picks_get_a_synthesized_manifest() {
        let selector = TrackSelector::default();
        let mut record = video("dash-720", 720, 30.0, "none", "http_dash_segments", 1500.0);
        record.url = None;
        record.fragment_base_url = Some("https://cdn.example.com/seg/".to_string());
        record.fragments = Some(vec![Fragment {
            path: Some("s1.m4s".to_string()),
            url: None,
            duration: Some(4.0),
        }]);

        let selected = selector.select_video(&[record], 300.0).unwrap();
        match &selected[0].source {
            TrackSource::Manifest { manifest } => {
                assert!(manifest.contains("<MPD"));
                assert!(manifest.contains("s1.m4s"));
            }
            TrackSource::Url { .. } => panic!("expected a manifest variant"),
        }
    }

    #[test]
    fn best_audio_is_selected_alone_by_default() {
        let selector = TrackSelector::default();
        let formats = vec![
            audio("140", "mp4a.40.2", "m3u8_native", Some(128.0)),
            audio("251", "opus", "https", Some(128.0)),
            audio("249", "opus", "https", Some(64.0)),
        ];

        let (selected, silent) = selector.select_audio(&formats, 300.0);
        assert!(!silent);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].format_id, "251");
        assert_eq!(selected[0].acodec, "opus");
    }

    #[test]
    fn all_audio_mode_returns_the_full_sorted_list() {
        let selector =
            TrackSelector::new(SelectionConfig::default().with_all_audio_tracks(true));
        let formats = vec![
            audio("234", "mp4a.40.2", "m3u8_native", Some(128.0)),
            audio("251", "opus", "https", Some(128.0)),
            // fragile direct-URL track stays in the result in this mode,
            // flagged by its codec/protocol metadata
            audio("140", "mp4a.40.2", "https", Some(192.0)),
        ];

        let (selected, silent) = selector.select_audio(&formats, 300.0);
        assert!(!silent);
        let ids: Vec<&str> = selected.iter().map(|a| a.format_id.as_str()).collect();
        assert_eq!(ids, vec!["251", "140", "234"]);
    }

    #[test]
    fn spurious_low_bitrate_audio_marks_the_source_silent() {
        let selector = TrackSelector::default();

        let (selected, silent) = selector.select_audio(&[audio("x", "opus", "https", Some(5.0))], 300.0);
        assert!(selected.is_empty());
        assert!(silent);

        // exactly 0 is likewise silent
        let (selected, silent) = selector.select_audio(&[audio("x", "opus", "https", Some(0.0))], 300.0);
        assert!(selected.is_empty());
        assert!(silent);

        // just above the ceiling is playable
        let (selected, silent) = selector.select_audio(&[audio("x", "opus", "https", Some(10.5))], 300.0);
        assert_eq!(selected.len(), 1);
        assert!(!silent);
    }

    #[test]
    fn unknown_bitrate_audio_is_playable_not_silent() {
        let selector = TrackSelector::default();
        let (selected, silent) = selector.select_audio(&[audio("233", "opus", "m3u8", None)], 300.0);
        assert_eq!(selected.len(), 1);
        assert!(!silent);
    }

    #[test]
    fn no_eligible_audio_is_empty_and_not_silent() {
        let selector = TrackSelector::default();
        let (selected, silent) =
            selector.select_audio(&[video("22", 720, 30.0, "mp4a.40.2", "https", 1200.0)], 300.0);
        assert!(selected.is_empty());
        assert!(!silent);
    }
}
