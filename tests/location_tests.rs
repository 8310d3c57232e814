// Host-side tests for URL fragment and query helpers.

use card_core::config::GalleryVariant;
use card_core::location::*;

#[test]
fn encode_matches_uri_component() {
    assert_eq!(encode_component("intro"), "intro");
    assert_eq!(encode_component("our story"), "our%20story");
    assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
    assert_eq!(encode_component("it's-fine_(ok)!~*."), "it's-fine_(ok)!~*.");
    assert_eq!(encode_component("💖"), "%F0%9F%92%96");
}

#[test]
fn hash_round_trip() {
    assert_eq!(hash_for("yes"), "#yes");
    assert_eq!(hash_for("our story"), "#our%20story");
    assert_eq!(id_from_hash("#our%20story").as_deref(), Some("our story"));
    assert_eq!(id_from_hash("yes").as_deref(), Some("yes"));
}

#[test]
fn empty_hash_has_no_id() {
    assert_eq!(id_from_hash(""), None);
    assert_eq!(id_from_hash("#"), None);
    assert_eq!(id_from_hash("#   "), None);
    assert_eq!(id_from_hash("#%20"), None);
}

#[test]
fn malformed_hash_falls_back_to_raw() {
    assert_eq!(id_from_hash("#%FF").as_deref(), Some("%FF"));
}

#[test]
fn query_param_lookup() {
    let search = "?a=1&gallery=stack&msg=hello+there";
    assert_eq!(query_param(search, "gallery").as_deref(), Some("stack"));
    assert_eq!(query_param(search, "msg").as_deref(), Some("hello there"));
    assert_eq!(query_param(search, "missing"), None);
    assert_eq!(query_param("?flag", "flag").as_deref(), Some(""));
    assert_eq!(query_param("", "a"), None);
}

#[test]
fn with_query_param_sets_key_last() {
    assert_eq!(with_query_param("", "gallery", "grid"), "?gallery=grid");
    assert_eq!(
        with_query_param("?a=1&gallery=grid&b=2", "gallery", "strip"),
        "?a=1&b=2&gallery=strip"
    );
}

#[test]
fn gallery_override_parses_variant() {
    assert_eq!(gallery_override("?gallery=Strip"), Some(GalleryVariant::Strip));
    assert_eq!(gallery_override("?gallery=carousel"), None);
    assert_eq!(gallery_override("?other=1"), None);
    assert_eq!(GALLERY_PARAM, "gallery");
}
