// Manifest Synthesizer - minimal DASH documents for fragment delivery
//
// A fragment-delivered rendition has no single resolvable URL, so the
// playback client gets a synthesized MPD instead: one adaptation set with
// one representation, a segment timeline, and one segment-URL entry per
// fragment. Timing uses a fixed reference timescale.

use crate::metadata::FormatRecord;
use crate::selection::config::SelectionConfig;

/// Declared role of the rendition inside the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRole {
    Video,
    Audio,
}

/// Format whole seconds as an ISO-8601 duration.
///
/// Zero hour/minute components are omitted entirely; the seconds component
/// is always present: 0 -> "PT0S", 3600 -> "PT1H0S", 11309 -> "PT3H8M29S".
pub fn duration_string(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{}H", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}M", minutes));
    }
    out.push_str(&format!("{}S", seconds));
    out
}

/// Escape literal ampersands so fragment paths stay valid XML attribute text
fn escape_path(path: &str) -> String {
    path.replace('&', "&amp;")
}

/// Declared MIME type; the downstream decoder dispatch keys off the
/// container extension, so a raw m4a container is declared as mp4
fn mime_type(record: &FormatRecord, role: MediaRole) -> String {
    let ext = if record.ext.is_empty() {
        "mp4"
    } else {
        record.ext.as_str()
    };
    match role {
        MediaRole::Video => format!("video/{}", ext),
        MediaRole::Audio => {
            let ext = if ext == "m4a" { "mp4" } else { ext };
            format!("audio/{}", ext)
        }
    }
}

/// Build the minimal MPD document for a fragment-delivered record
pub fn build_manifest(
    record: &FormatRecord,
    duration_seconds: f64,
    role: MediaRole,
    config: &SelectionConfig,
) -> String {
    let timescale = config.manifest_timescale;
    let duration_iso = duration_string(duration_seconds.max(0.0) as u64);
    let bandwidth = (record.tbr() * 1000.0) as u64;
    let base_url = record.fragment_base_url.as_deref().unwrap_or("");

    let mut mpd = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
"#,
    );
    mpd.push_str(&format!(
        r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" profiles="urn:mpeg:dash:profile:isoff-main:2011" type="static" mediaPresentationDuration="{}" minBufferTime="PT2S">
"#,
        duration_iso
    ));
    mpd.push_str(&format!("  <Period duration=\"{}\">\n", duration_iso));
    mpd.push_str(&format!(
        "    <AdaptationSet mimeType=\"{}\" segmentAlignment=\"true\">\n",
        mime_type(record, role)
    ));
    mpd.push_str(&format!(
        "      <Representation id=\"{}\" bandwidth=\"{}\">\n",
        record.format_id, bandwidth
    ));
    if !base_url.is_empty() {
        mpd.push_str(&format!("        <BaseURL>{}</BaseURL>\n", escape_path(base_url)));
    }
    mpd.push_str(&format!("        <SegmentList timescale=\"{}\">\n", timescale));

    let fragments: &[_] = record.fragments.as_deref().unwrap_or(&[]);

    // Timeline entries accumulate strictly in fragment order, starting at 0.
    // A fragment without a duration gets a degenerate placeholder, not an
    // error.
    mpd.push_str("          <SegmentTimeline>\n");
    let mut start: u64 = 0;
    for fragment in fragments {
        let seconds = fragment
            .duration
            .unwrap_or(config.default_fragment_duration);
        let ticks = (seconds * f64::from(timescale)).round() as u64;
        mpd.push_str(&format!(
            "            <S t=\"{}\" d=\"{}\"/>\n",
            start, ticks
        ));
        start += ticks;
    }
    mpd.push_str("          </SegmentTimeline>\n");

    for fragment in fragments {
        mpd.push_str(&format!(
            "          <SegmentURL media=\"{}\"/>\n",
            escape_path(fragment.location())
        ));
    }

    mpd.push_str("        </SegmentList>\n");
    mpd.push_str("      </Representation>\n");
    mpd.push_str("    </AdaptationSet>\n");
    mpd.push_str("  </Period>\n");
    mpd.push_str("</MPD>\n");

    mpd
}
