//! Fragment helpers
//!
//! Pure string functions for pulling a router path out of an href or a raw
//! `location.hash` value.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([^#]*)$").expect("fragment regex is valid")
});

/// Text after the last `#` of `href`, or `""` when there is none
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::extract_fragment;
///
/// assert_eq!(extract_fragment("https://example.com/app#users/42"), "users/42");
/// assert_eq!(extract_fragment("/app#a#b"), "b");
/// assert_eq!(extract_fragment("/app"), "");
/// ```
pub fn extract_fragment(href: &str) -> &str {
    TRAILING_FRAGMENT
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}

/// Drops one leading `#`, as found on `location.hash`
pub fn strip_hash(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Percent-decodes a fragment as the browser serializes it
///
/// `location.hash` and resolved anchor hrefs carry `caf%C3%A9` where the
/// router wrote `café`. Input that does not decode to UTF-8 is kept as is.
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::decode_fragment;
///
/// assert_eq!(decode_fragment("caf%C3%A9/1"), "café/1");
/// assert_eq!(decode_fragment("users/42"), "users/42");
/// ```
pub fn decode_fragment(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(fragment = raw, error = %err, "fragment is not valid UTF-8 once decoded");
            Cow::Borrowed(raw)
        }
    }
}
