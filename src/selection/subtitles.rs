// Subtitle Locale Resolver - caption track choice over the extractor's maps
//
// Caption tracks come in two maps keyed by language tag: manually authored
// subtitles and machine-generated captions. Resolution walks a priority
// chain built from the requested locales plus a fixed English fallback,
// and only considers flat web-friendly files; playlist- or
// fragment-delivered caption entries cannot be served as files downstream.

use std::collections::HashMap;

use crate::metadata::{CaptionFile, VideoMetadata};
use crate::selection::config::SelectionConfig;
use crate::selection::models::SubtitleCandidate;

/// Build the priority list for a set of requested locales.
///
/// Each requested locale contributes its full tag and its 2-letter prefix,
/// the English fallback chain is appended, duplicates keep their first
/// occurrence, and the list is reversed so the first requested locale ends
/// up with the highest index. Matching then scores "higher index wins".
fn locale_priorities(requested: &[String], config: &SelectionConfig) -> Vec<String> {
    let mut chain: Vec<String> = Vec::new();
    for locale in requested {
        chain.push(locale.clone());
        // Locale tags are free-form; the 2-byte prefix only exists when it
        // falls on a character boundary
        if locale.len() > 2 {
            if let Some(prefix) = locale.get(..2) {
                chain.push(prefix.to_string());
            }
        }
    }
    chain.extend(config.english_fallback.iter().cloned());

    let mut deduped: Vec<String> = Vec::new();
    for tag in chain {
        if !deduped.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            deduped.push(tag);
        }
    }
    deduped.reverse();
    deduped
}

/// Priority of a language key against the chain, -1 when unmatched
fn priority_of(language: &str, priorities: &[String]) -> i64 {
    priorities
        .iter()
        .position(|tag| tag.eq_ignore_ascii_case(language))
        .map_or(-1, |i| i as i64)
}

/// Check that a caption file is usable as a flat subtitle file
fn is_flat_caption(config: &SelectionConfig, file: &CaptionFile) -> bool {
    file.ext == config.subtitle_ext
        && !file.url.is_empty()
        && !file.protocol.contains(&config.playlist_tag)
        && !file.protocol.contains(&config.fragment_tag)
}

/// Pick the caption file whose language key ranks highest for the requested
/// locales. No match is a valid empty result.
pub fn find_best_subtitle(
    captions: &HashMap<String, Vec<CaptionFile>>,
    requested: &[String],
    config: &SelectionConfig,
) -> Option<SubtitleCandidate> {
    let priorities = locale_priorities(requested, config);

    // Map iteration order is arbitrary; walk the keys sorted so equal-rank
    // outcomes stay deterministic
    let mut languages: Vec<&String> = captions.keys().collect();
    languages.sort();

    let mut best: Option<(i64, SubtitleCandidate)> = None;
    for language in languages {
        let rank = priority_of(language, &priorities);
        if rank < 0 {
            continue;
        }
        if let Some((best_rank, _)) = &best {
            if rank <= *best_rank {
                continue;
            }
        }
        if let Some(file) = captions[language]
            .iter()
            .find(|f| is_flat_caption(config, f))
        {
            best = Some((
                rank,
                SubtitleCandidate {
                    language: language.clone(),
                    url: file.url.clone(),
                },
            ));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Fetch address for a caption file, routed through the local proxy
pub fn proxy_url(origin: &str, upstream: &str) -> String {
    format!("{}/ytdl/vtt?suburi={}", origin, urlencoding::encode(upstream))
}

/// Resolve one proxied subtitle URL per requested locale.
///
/// Manually authored subtitles are consulted before machine-generated
/// captions. Unresolved locales map to empty strings. An empty request
/// list still resolves once through the English fallback chain, keyed by
/// the matched language.
pub fn resolve_subtitles(
    metadata: &VideoMetadata,
    origin: &str,
    locales: &[String],
    config: &SelectionConfig,
) -> HashMap<String, String> {
    let mut resolved = HashMap::new();

    let lookup = |requested: &[String]| -> Option<SubtitleCandidate> {
        find_best_subtitle(&metadata.subtitles, requested, config)
            .or_else(|| find_best_subtitle(&metadata.automatic_captions, requested, config))
    };

    if locales.is_empty() {
        if let Some(candidate) = lookup(&[]) {
            resolved.insert(candidate.language, proxy_url(origin, &candidate.url));
        }
        return resolved;
    }

    for locale in locales {
        let url = lookup(std::slice::from_ref(locale))
            .map(|c| proxy_url(origin, &c.url))
            .unwrap_or_default();
        resolved.insert(locale.clone(), url);
    }
    resolved
}
