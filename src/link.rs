//! Link utilities: URL normalization, link ranges around the selection and
//! autolink detection in plain text.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::constants::link::{DEFAULT_PROTOCOL, MARK};
use crate::document::{DocumentState, MarkRange};

// Scheme followed by "//", protocol relative URLs and schemes used without authority
static SUPPORTED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:(?:(?:https?|ftp):)?//|(?:mailto|tel):)").unwrap());

static AUTOLINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>]+|\b[a-z0-9][a-z0-9-]*(?:\.[a-z0-9-]+)*\.(?:com|org|net|io|dev|app|edu|gov|info|co|uk|de|fr|es)\b(?:/[^\s<>]*)?",
    )
    .unwrap()
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', '"', '\''];

/// A link mark found in the document state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRange {
    pub from: usize,
    pub to: usize,
    pub text: String,
    pub href: Option<String>,
}

/// A URL detected in plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoLink {
    pub from: usize,
    pub to: usize,
    pub text: String,
    pub href: String,
}

/// Normalizes the given URL using the default protocol (`http:`).
///
/// # Examples
///
/// ```
/// use marginalia::link::extract_href;
///
/// assert_eq!(extract_href("example.com"), "http://example.com");
/// assert_eq!(extract_href("https://example.com"), "https://example.com");
/// assert_eq!(extract_href("//cdn.example.com/x"), "//cdn.example.com/x");
/// ```
pub fn extract_href(url: &str) -> String {
    extract_href_with(url, DEFAULT_PROTOCOL)
}

/// Returns the URL unchanged when it already starts with a recognized scheme or is
/// protocol relative, otherwise prepends `protocol` followed by `//`.
///
/// The check is purely textual, the URL is not validated.
pub fn extract_href_with(url: &str, protocol: &str) -> String {
    if SUPPORTED_URL.is_match(url) {
        url.to_string()
    } else {
        format!("{}//{}", protocol.trim_end_matches('/'), url)
    }
}

fn to_link_range(state: &DocumentState, mark: &MarkRange) -> LinkRange {
    LinkRange {
        from: mark.from,
        to: mark.to,
        text: state.text_between(mark.from, mark.to),
        href: mark.attrs.get("href").cloned(),
    }
}

/// Returns the link covering the whole selection (if any)
pub fn active_link(state: &DocumentState) -> Option<LinkRange> {
    state
        .marks_of(MARK)
        .find(|mark| mark.contains(&state.selection))
        .map(|mark| to_link_range(state, mark))
}

/// Returns every link sharing at least one position with the selection, in document order
pub fn selection_links(state: &DocumentState) -> Vec<LinkRange> {
    state
        .marks_of(MARK)
        .filter(|mark| mark.touches(&state.selection))
        .map(|mark| to_link_range(state, mark))
        .collect()
}

/// Finds the URLs present in the given text.
///
/// Positions are character offsets. Trailing punctuation is not part of the link
/// and e-mail domains are ignored.
pub fn find_autolinks(text: &str) -> Vec<AutoLink> {
    AUTOLINK_PATTERN
        .find_iter(text)
        .filter(|m| !text[..m.start()].ends_with('@'))
        .filter_map(|m| {
            let matched = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
            if matched.is_empty() {
                return None;
            }
            let from = text[..m.start()].chars().count();
            let to = from + matched.chars().count();
            Some(AutoLink {
                from,
                to,
                text: matched.to_string(),
                href: extract_href(matched),
            })
        })
        .collect()
}
