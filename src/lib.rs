// ytdl-select - track selection and manifest synthesis over extractor output
//
// Pipeline: parse the extractor's JSON document, filter and order the
// advertised renditions, pick tracks per quality tier, synthesize
// segmented-media manifests for fragment-delivered picks, resolve
// subtitles per requested locale, and assemble the playback-ready result.

pub mod errors;
pub mod metadata;
pub mod selection;

pub use errors::SelectError;
pub use metadata::{parse_metadata, CaptionFile, FormatRecord, Fragment, VideoMetadata};
pub use selection::{
    ProcessedVideo, SelectedAudio, SelectedVideo, SelectionConfig, SubtitleCandidate,
    TrackSelector, TrackSource,
};

use selection::subtitles::resolve_subtitles;

/// Run the full selection pipeline over one extractor document.
///
/// `raw` is the extractor's complete JSON output for a single video,
/// `origin` the address subtitle fetches are proxied through, and
/// `locales` the viewer's ordered subtitle preferences.
pub fn process(
    raw: &str,
    origin: &str,
    locales: &[String],
    config: SelectionConfig,
) -> Result<ProcessedVideo, SelectError> {
    let meta = parse_metadata(raw)?;
    let duration = meta.duration();

    let selector = TrackSelector::new(config);
    let video = selector.select_video(&meta.formats, duration)?;
    let (audio, silent_source) = selector.select_audio(&meta.formats, duration);
    let subtitles = resolve_subtitles(&meta, origin, locales, selector.config());

    Ok(ProcessedVideo {
        title: meta.title(),
        duration,
        thumbnail: meta.thumbnail(),
        cookies: meta.cookies(),
        video,
        audio,
        silent_source,
        subtitles,
    })
}
