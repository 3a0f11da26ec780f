//! Read-only queries over canonical text: referenced entries, ids and links.

use super::tokenizer::{scan_mention_tokens, scan_urls, tokenize};
use super::resolver::resolve_ranges;
use crate::models::{MentionEntry, MentionResolver, RangePayload};
use rustc_hash::FxHashSet;

/// Ids of every syntactically valid mention token, lowercased and deduplicated,
/// in order of first occurrence. No directory lookup.
pub fn mention_ids(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    scan_mention_tokens(text)
        .into_iter()
        .map(|token| token.id.to_ascii_lowercase())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Entries the text mentions (as rendered, so mentions inside URLs do not
/// count), deduplicated by id in order of first occurrence.
pub fn mentioned_entries<R>(text: &str, resolver: &R) -> Vec<MentionEntry>
where
    R: MentionResolver + ?Sized,
{
    let mut seen = FxHashSet::default();
    resolve_ranges(tokenize(text, resolver))
        .into_iter()
        .filter_map(|range| match range.payload {
            RangePayload::Mention(chip) => Some(chip.entry),
            RangePayload::Url { .. } => None,
        })
        .filter(|entry| seen.insert(entry.id.to_ascii_lowercase()))
        .collect()
}

/// URLs in the text, deduplicated in order. Bare schemes (`https://` with no
/// host) are skipped.
pub fn extract_links(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    scan_urls(text)
        .into_iter()
        .filter_map(|range| match range.payload {
            RangePayload::Url { href } => Some(href),
            RangePayload::Mention(_) => None,
        })
        .filter(|href| has_host(href))
        .filter(|href| seen.insert(href.clone()))
        .collect()
}

fn has_host(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or_default();
    rest.split(['/', '?', '#'])
        .next()
        .is_some_and(|host| !host.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/extract.rs"]
mod tests;
