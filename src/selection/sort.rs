// Deterministic Comparators - total orders over candidate tracks
//
// Both comparators are ordered rule chains reduced left to right, ending in
// a format_id tiebreak so two distinct candidates never compare Equal and
// a given format list always sorts the same way.

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;

use crate::metadata::FormatRecord;
use crate::selection::config::SelectionConfig;

lazy_static! {
    // Vendor query-parameter tag marking the audio track of a combined
    // rendition as the canonical/original-language track or as a dub.
    // The tag may arrive percent-encoded.
    static ref ACONT_ORIGINAL_RE: Regex = Regex::new(r"acont(?:%3D|=)original").unwrap();
    static ref ACONT_DUBBED_RE: Regex = Regex::new(r"acont(?:%3D|=)dubbed").unwrap();
}

/// Rank of the audio-content URL tag: canonical > unmarked > dubbed
fn audio_content_rank(record: &FormatRecord) -> u8 {
    match record.url.as_deref() {
        Some(url) if ACONT_ORIGINAL_RE.is_match(url) => 2,
        Some(url) if ACONT_DUBBED_RE.is_match(url) => 0,
        _ => 1,
    }
}

/// Rank of the separated-audio variant among one vendor's CDN interconnect
/// formats; other formats are unaffected
fn split_audio_rank(config: &SelectionConfig, record: &FormatRecord) -> u8 {
    let vendor = config
        .interconnect_tags
        .iter()
        .any(|tag| record.format_id.contains(tag.as_str()));
    if vendor && record.format_id.contains(&config.split_audio_marker) {
        0
    } else {
        1
    }
}

fn is_playlist(config: &SelectionConfig, record: &FormatRecord) -> bool {
    record.protocol.contains(&config.playlist_tag)
}

fn is_fragment_manifest(config: &SelectionConfig, record: &FormatRecord) -> bool {
    record.protocol.contains(&config.fragment_tag)
}

/// Total order over video candidates; Less means `a` ranks first.
///
/// Precedence: canonical-audio URL tag, height (desc), non-playlist
/// delivery, combined audio+video, vendor separated-audio variant, total
/// bitrate (asc - equal-quality lower-bitrate renditions reduce decode
/// pressure on constrained clients), format_id.
pub fn video_order(config: &SelectionConfig, a: &FormatRecord, b: &FormatRecord) -> Ordering {
    audio_content_rank(b)
        .cmp(&audio_content_rank(a))
        .then_with(|| b.height().cmp(&a.height()))
        .then_with(|| is_playlist(config, a).cmp(&is_playlist(config, b)))
        .then_with(|| a.is_video_only().cmp(&b.is_video_only()))
        .then_with(|| split_audio_rank(config, a).cmp(&split_audio_rank(config, b)))
        .then_with(|| a.tbr().total_cmp(&b.tbr()))
        .then_with(|| a.format_id.cmp(&b.format_id))
}

fn is_english(record: &FormatRecord) -> bool {
    record
        .language
        .as_deref()
        .map_or(false, |l| l.to_ascii_lowercase().starts_with("en"))
}

fn is_opus(record: &FormatRecord) -> bool {
    record
        .acodec
        .as_deref()
        .map_or(false, |a| a.contains("opus"))
}

/// Total order over audio candidates; Less means `a` ranks first.
///
/// Precedence: non-fragmented-manifest delivery, English-prefixed language
/// (non-English tracks stay usable, just ranked lower), opus codec, audio
/// bitrate (desc, absent treated as 0), format_id.
pub fn audio_order(config: &SelectionConfig, a: &FormatRecord, b: &FormatRecord) -> Ordering {
    is_fragment_manifest(config, a)
        .cmp(&is_fragment_manifest(config, b))
        .then_with(|| is_english(b).cmp(&is_english(a)))
        .then_with(|| is_opus(b).cmp(&is_opus(a)))
        .then_with(|| b.abr().total_cmp(&a.abr()))
        .then_with(|| a.format_id.cmp(&b.format_id))
}
