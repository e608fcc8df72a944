// Capability Filters - pure eligibility predicates
//
// Classify a format record as eligible video or eligible audio for the
// constrained playback client. Compatibility constraints here are
// empirically discovered; the rule tables live in SelectionConfig.

use crate::metadata::FormatRecord;
use crate::selection::config::SelectionConfig;

/// Check whether a record is selectable as a video rendition
pub fn is_eligible_video(config: &SelectionConfig, record: &FormatRecord) -> bool {
    // "source" and http-prefixed ids are synthetic entries, never selectable
    if record.is_synthetic() {
        return false;
    }

    // No visual payload
    if !record.has_video() {
        return false;
    }

    // Codecs the target hardware decoders cannot play
    let vcodec = record.vcodec.as_deref().unwrap_or("");
    if config
        .codec_denylist
        .iter()
        .any(|tag| vcodec.contains(tag.as_str()))
    {
        return false;
    }

    // Direct-URL video-only streams break seek behavior downstream;
    // fragment/playlist-delivered video-only records are fine
    if record.is_video_only() && record.protocol.contains(&config.direct_tag) {
        return false;
    }

    // The reference decoder cannot sustain high frame rates at >=1080p
    record.height() < config.fps_cap_height || record.fps() <= config.fps_cap
}

/// Check whether a record is selectable as an audio track.
///
/// `strict` additionally rejects direct-URL tracks with the fragile codec
/// tag; callers that want every eligible track back (to pick per client
/// capability at the edge) pass `strict = false` and decide at runtime.
pub fn is_eligible_audio(config: &SelectionConfig, record: &FormatRecord, strict: bool) -> bool {
    // Explicitly marked non-audio
    if record.acodec.as_deref() == Some("none") {
        return false;
    }

    // Cannot be an audio track: no codec, no audio container, no bitrate
    let has_acodec = record.acodec.as_deref().map_or(false, |a| !a.is_empty());
    let has_audio_ext = record
        .audio_ext
        .as_deref()
        .map_or(false, |e| !e.is_empty() && e != "none");
    if !has_acodec && !has_audio_ext && record.abr.is_none() {
        return false;
    }

    // This filter operates only on audio-only records
    if record.has_video() {
        return false;
    }

    // Direct-URL tracks with this codec tag fail on a subset of target
    // hardware
    if strict
        && record.protocol.contains(&config.direct_tag)
        && record
            .acodec
            .as_deref()
            .map_or(false, |a| a.contains(&config.fragile_direct_acodec))
    {
        return false;
    }

    true
}
