//! Query string handling for navigable fragments.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Query parameters attached to a navigation, ordered by key.
pub type Query = BTreeMap<String, String>;

/// Splits a fragment into its path and parsed query.
///
/// Leading `/` characters are dropped from the path.
///
/// ```
/// use hashbang_router::query::split_fragment;
///
/// let (path, query) = split_fragment("/users/1?tab=posts");
/// assert_eq!(path, "users/1");
/// assert_eq!(query.get("tab").map(String::as_str), Some("posts"));
/// ```
#[must_use]
pub fn split_fragment(fragment: &str) -> (&str, Query) {
    let fragment = fragment.trim_start_matches('/');
    match fragment.split_once('?') {
        Some((path, query)) => (path, parse_query_string(query)),
        None => (fragment, Query::new()),
    }
}

/// Joins a path and query into the fragment form `path[?query]`.
#[must_use]
pub fn join_fragment(path: &str, query: &Query) -> String {
    let mut fragment = path.trim_start_matches('/').to_string();
    if !query.is_empty() {
        fragment.push('?');
        fragment.push_str(&serialize_query(query));
    }
    fragment
}

/// Parses query parameters from a query string.
#[must_use]
pub fn parse_query_string(query: &str) -> Query {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(value)))
        })
        .collect()
}

/// Serializes query parameters as `key=value` pairs joined by `&`.
#[must_use]
pub fn serialize_query(query: &Query) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encodes everything outside the unreserved set.
fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            result.push(char::from(byte));
        } else {
            let _ = write!(result, "%{byte:02X}");
        }
    }
    result
}

/// Decodes `%XX` escapes and `+` as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    decoded.push(byte);
                    i += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            b'+' => decoded.push(b' '),
            other => decoded.push(other),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}
