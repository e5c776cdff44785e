//! Shared utilities for link classification and link-text cleanup.
//!
//! Used by the extraction engine and by link resolution in the vault crate
//! so both agree on what counts as an intra-vault reference.

/// What a link destination points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Another document in the vault; holds the link text as written
    Internal(String),
    /// `http://`, `https://`, `mailto:` or any other URL scheme
    External,
    /// Same-document heading or block reference (`#section`, `#^block`)
    Anchor,
}

/// Classify a markdown link destination.
///
/// # Examples
///
/// ```
/// use relmove_parser::link_utils::{classify_url, LinkTarget};
///
/// assert_eq!(classify_url("https://example.com"), LinkTarget::External);
/// assert_eq!(classify_url("#section"), LinkTarget::Anchor);
/// assert_eq!(
///     classify_url("docs/My%20Note.md#intro"),
///     LinkTarget::Internal("docs/My Note.md#intro".to_string())
/// );
/// ```
pub fn classify_url(url: &str) -> LinkTarget {
    let url = url.trim();

    if url.is_empty() || url.starts_with('#') {
        return LinkTarget::Anchor;
    }

    if has_scheme(url) {
        return LinkTarget::External;
    }

    LinkTarget::Internal(decode_percent(url))
}

/// Classify a wikilink or embed target (`Note`, `Note#Heading`, `#Heading`).
pub fn classify_wikilink(target: &str) -> LinkTarget {
    let target = target.trim();
    if target.is_empty() || target.starts_with('#') {
        LinkTarget::Anchor
    } else {
        LinkTarget::Internal(target.to_string())
    }
}

/// Strip the subpath (`#heading`, `#^block`) from link text.
///
/// ```
/// use relmove_parser::link_utils::link_path;
///
/// assert_eq!(link_path("Note#Heading"), "Note");
/// assert_eq!(link_path("folder/Note#^abc"), "folder/Note");
/// assert_eq!(link_path(" Note "), "Note");
/// ```
pub fn link_path(link_text: &str) -> &str {
    link_text.split('#').next().unwrap_or("").trim()
}

/// Split `target|display` into the target part.
pub fn strip_display_text(raw: &str) -> &str {
    match raw.find('|') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

fn has_scheme(url: &str) -> bool {
    if url.starts_with("mailto:") {
        return true;
    }
    match url.find("://") {
        Some(idx) => url[..idx]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')),
        None => false,
    }
}

/// Decode `%XX` escapes; text that does not decode to UTF-8 is kept verbatim.
fn decode_percent(input: &str) -> String {
    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| input.to_string())
}
