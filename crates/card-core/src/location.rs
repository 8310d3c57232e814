//! URL fragment and query-string helpers.

use crate::config::GalleryVariant;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const GALLERY_PARAM: &str = "gallery";

pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

fn decode_component(s: &str) -> String {
    percent_decode_str(&s.replace('+', " "))
        .decode_utf8()
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// `#id` fragment mirrored into the address bar.
pub fn hash_for(id: &str) -> String {
    format!("#{}", encode_component(id))
}

/// Decoded id carried by a `location.hash` value, if any.
pub fn id_from_hash(hash: &str) -> Option<String> {
    let raw = hash.strip_prefix('#').unwrap_or(hash).trim();
    if raw.is_empty() {
        return None;
    }
    let id = percent_decode_str(raw)
        .decode_utf8()
        .map(|c| c.trim().to_string())
        .unwrap_or_else(|_| raw.to_string());
    (!id.is_empty()).then_some(id)
}

pub fn query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&').filter(|p| !p.is_empty()) {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if decode_component(k) == key {
            return Some(decode_component(v));
        }
    }
    None
}

/// Rebuild a query string with `key` set to `value`, keeping other pairs in order.
pub fn with_query_param(search: &str, key: &str, value: &str) -> String {
    let s = search.trim_start_matches('?');
    let mut pairs: Vec<String> = s
        .split('&')
        .filter(|p| !p.is_empty())
        .filter(|p| decode_component(p.split('=').next().unwrap_or("")) != key)
        .map(str::to_string)
        .collect();
    pairs.push(format!("{}={}", encode_component(key), encode_component(value)));
    format!("?{}", pairs.join("&"))
}

/// Gallery variant selected by the query string, if valid.
pub fn gallery_override(search: &str) -> Option<GalleryVariant> {
    query_param(search, GALLERY_PARAM).and_then(|v| GalleryVariant::parse(&v))
}
