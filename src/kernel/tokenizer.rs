//! Range tokenizer: finds URL and mention ranges in canonical text.
//!
//! Output is unsorted and may overlap; `resolver::resolve_ranges` orders it.
//! Offsets are char offsets into the canonical text.

use crate::models::{MentionResolver, TaggedRange};
use regex::Regex;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("url pattern"))
}

fn mention_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)@event:([0-9a-f]{24})").expect("mention pattern"))
}

/// A syntactically valid mention token, before directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionToken {
    pub start: usize,
    pub end: usize,
    pub id: String,
    /// The token exactly as written.
    pub token: String,
}

/// Chars that may follow a mention id. Anything else (including another hex
/// char) means the candidate is part of a longer word.
pub fn is_mention_boundary(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(ch) => {
            ch.is_whitespace() || matches!(ch, '@' | '#' | '.' | ',' | '!' | '?' | ';' | ':')
        }
    }
}

/// Converts increasing byte offsets to char offsets in one forward pass.
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn advance_to(&mut self, byte: usize) -> usize {
        if byte > self.byte {
            self.chars += self.text[self.byte..byte].chars().count();
            self.byte = byte;
        }
        self.chars
    }
}

pub fn scan_urls(text: &str) -> Vec<TaggedRange> {
    let mut cursor = CharCursor::new(text);
    url_regex()
        .find_iter(text)
        .map(|m| {
            let start = cursor.advance_to(m.start());
            let end = cursor.advance_to(m.end());
            TaggedRange::url(start, end, m.as_str())
        })
        .collect()
}

pub fn scan_mention_tokens(text: &str) -> Vec<MentionToken> {
    let mut cursor = CharCursor::new(text);
    let mut tokens = Vec::new();
    for caps in mention_regex().captures_iter(text) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if !is_mention_boundary(text[whole.end()..].chars().next()) {
            continue;
        }
        let start = cursor.advance_to(whole.start());
        let end = cursor.advance_to(whole.end());
        tokens.push(MentionToken {
            start,
            end,
            id: id.as_str().to_string(),
            token: whole.as_str().to_string(),
        });
    }
    tokens
}

/// Scans `text` for URL ranges and directory-resolved mention ranges.
///
/// A mention starting inside a URL is discarded; unresolved ids are skipped.
pub fn tokenize<R>(text: &str, resolver: &R) -> Vec<TaggedRange>
where
    R: MentionResolver + ?Sized,
{
    let mut ranges = scan_urls(text);
    let url_count = ranges.len();

    for candidate in scan_mention_tokens(text) {
        if ranges[..url_count]
            .iter()
            .any(|url| url.contains(candidate.start))
        {
            continue;
        }
        let Some(entry) = resolver.resolve(&candidate.id) else {
            continue;
        };
        let mut chip = resolver.render(entry);
        chip.token = candidate.token;
        ranges.push(TaggedRange::mention(candidate.start, candidate.end, chip));
    }

    ranges
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/tokenizer.rs"]
mod tests;
