//! Voice selection
//!
//! Ranks host voices against a target language tag. The best tier wins;
//! within a tier the host's order decides.

use domain::{Language, primary_subtag};

use crate::types::Voice;

/// How well a voice matches the target language, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Same language tag (`te-IN` for `te-IN`)
    ExactTag,
    /// Tag starts with the primary language subtag (`te`, `tel-IND` for `te-IN`)
    PrimarySubtag,
    /// Display name mentions the language (`... Telugu ...`)
    LanguageName,
    /// Display name mentions the broader region (`... India ...`)
    Region,
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// Tier at which `voice` matches `language_tag`, if any
#[must_use]
pub fn match_tier(voice: &Voice, language_tag: &str) -> Option<MatchTier> {
    let target = normalize_tag(language_tag);
    let voice_tag = normalize_tag(&voice.language_tag);

    if !target.is_empty() && voice_tag == target {
        return Some(MatchTier::ExactTag);
    }

    let primary = primary_subtag(&target);
    if !primary.is_empty() && voice_tag.starts_with(primary) {
        return Some(MatchTier::PrimarySubtag);
    }

    let language = Language::from_tag(language_tag)?;
    let name = voice.display_name.to_lowercase();

    if name.contains(language.english_name()) {
        return Some(MatchTier::LanguageName);
    }

    language
        .region_marker()
        .filter(|marker| name.contains(marker))
        .map(|_| MatchTier::Region)
}

/// Best voice for `language_tag`, or `None` when nothing fits
///
/// `None` is not an error; the caller falls back to server-rendered audio.
#[must_use]
pub fn select<'a>(voices: &'a [Voice], language_tag: &str) -> Option<&'a Voice> {
    voices
        .iter()
        .filter_map(|voice| match_tier(voice, language_tag).map(|tier| (tier, voice)))
        .min_by_key(|(tier, _)| *tier)
        .map(|(_, voice)| voice)
}
