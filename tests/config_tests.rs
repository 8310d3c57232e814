// Host-side tests for card configuration parsing and validation.

mod common;

use card_core::config::{GalleryVariant, Layout, Mode, Variant};
use card_core::{CardConfig, CardError};
use common::sample;

#[test]
fn sample_parses_with_defaults() {
    let cfg = sample();
    assert_eq!(cfg.page_title, "For you");
    assert!(cfg.allow_no);
    assert_eq!(cfg.mode, Mode::Single);
    assert!(cfg.reveal_on_scroll);
    assert_eq!(cfg.gallery_variant, GalleryVariant::Grid);
    assert_eq!(cfg.scenes.len(), 4);
    assert_eq!(cfg.chapters.len(), 2);
    assert!(cfg.chase.enabled);
    assert!(cfg.chase.show_serious_links);
    assert!(cfg.pages.story.is_none());
    assert!(cfg.pages.no.is_none());
}

#[test]
fn minimal_config_only_needs_scenes() {
    let cfg = CardConfig::from_json(r#"{ "scenes": [{ "id": "intro" }] }"#).unwrap();
    assert_eq!(cfg.scenes[0].title, "");
    assert!(cfg.scenes[0].actions.is_empty());
    assert!(cfg.chapters.is_empty());
    assert_eq!(cfg.chase.trigger_radius(), 110.0);
    assert_eq!(cfg.chase.dodge_distance(), 170.0);
    assert!(!cfg.runaway_no.enabled);
    assert!(cfg.runaway_no.stop_after_max_dodges);
}

#[test]
fn empty_document_is_missing_config() {
    assert!(matches!(CardConfig::from_json(""), Err(CardError::MissingConfig(_))));
    assert!(matches!(CardConfig::from_json("  \n"), Err(CardError::MissingConfig(_))));
}

#[test]
fn malformed_json_is_rejected() {
    let err = CardConfig::from_json("{ \"scenes\": [").unwrap_err();
    assert!(matches!(err, CardError::MalformedConfig(_)));
    assert!(err.to_string().starts_with("malformed card config"));
}

#[test]
fn no_scenes_is_rejected() {
    assert!(matches!(CardConfig::from_json("{}"), Err(CardError::NoScenes)));
    assert!(matches!(
        CardConfig::from_json(r#"{ "scenes": [] }"#),
        Err(CardError::NoScenes)
    ));
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = CardConfig::from_json(r#"{ "scenes": [{ "id": "a" }, { "id": "a" }] }"#).unwrap_err();
    match err {
        CardError::DuplicateId { kind, id } => {
            assert_eq!(kind, "scene");
            assert_eq!(id, "a");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = CardConfig::from_json(
        r#"{ "scenes": [{ "id": "intro" }], "chapters": [{ "id": "c" }, { "id": "c" }] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, CardError::DuplicateId { kind: "chapter", .. }));
}

#[test]
fn dangling_scene_links_only_warn() {
    let cfg = CardConfig::from_json(
        r#"{ "scenes": [{ "id": "intro", "actions": [{ "label": "Go", "to": "nowhere" }] }] }"#,
    );
    assert!(cfg.is_ok());
}

#[test]
fn numeric_floors_apply() {
    let cfg = sample();
    assert_eq!(cfg.chapters[0].track_vh(), 120.0);
    assert_eq!(cfg.chapters[1].track_vh(), 200.0);
    assert_eq!(cfg.floating[0].width_px(), 60.0);
    assert_eq!(cfg.floating[1].width_px(), 160.0);

    let cfg = CardConfig::from_json(
        r#"{ "scenes": [{ "id": "intro" }], "chase": { "triggerRadiusPx": 10, "dodgeDistancePx": 5 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.chase.trigger_radius(), 50.0);
    assert_eq!(cfg.chase.dodge_distance(), 60.0);
}

#[test]
fn unknown_enum_values_fall_back() {
    let cfg = CardConfig::from_json(
        r#"{
          "mode": "carousel",
          "scenes": [{ "id": "intro", "actions": [{ "label": "x", "variant": "tertiary", "onClick": "explode" }] }],
          "chapters": [{ "id": "c", "layout": "diagonal" }]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.mode, Mode::Single);
    assert_eq!(cfg.scenes[0].actions[0].variant, Variant::Primary);
    assert_eq!(cfg.chapters[0].layout, Layout::Split);
}

#[test]
fn chapter_layout_and_badge() {
    let cfg = sample();
    assert_eq!(cfg.chapters[0].layout, Layout::Split);
    assert_eq!(cfg.chapters[1].layout, Layout::Question);
    assert!(cfg.chapters[0].show_badge);
    assert_eq!(cfg.chapters[0].id(), "hello");
    assert!(cfg.chapter("ask").is_some());
    assert!(cfg.chapter("missing").is_none());
}

#[test]
fn image_lookup() {
    let cfg = sample();
    assert_eq!(cfg.image_src(Some("hero")), Some("img/hero.jpg"));
    assert_eq!(cfg.image_src(Some("missing")), None);
    assert_eq!(cfg.image_src(None), None);
}

#[test]
fn floating_ranges() {
    let cfg = sample();
    assert_eq!(cfg.floating[0].range(), Some(("hello", "ask")));
    assert_eq!(cfg.floating[1].range(), Some(("ask", "ask")));
    assert_eq!(cfg.floating[2].range(), None);
}

#[test]
fn question_page_defaults_fill_gaps() {
    let cfg = sample();
    let q = cfg.pages.question.as_ref().unwrap();
    assert_eq!(q.title, "Be mine?");
    assert_eq!(q.yes_label, "Yes 💖");
    assert_eq!(q.no_href, "no.html");
    assert_eq!(q.no_confirm.prompts.len(), 2);
    assert_eq!(q.no_confirm.final_no_taunt, "Okay 💛");
    assert_eq!(q.no_confirm.no_label_during.as_deref(), Some("Still no"));
}

#[test]
fn action_helpers() {
    let cfg = sample();
    let question = &cfg.scenes[1];
    assert!(question.actions[1].targets("no"));
    assert!(!question.actions[0].targets("no"));
    assert_eq!(question.actions[1].variant.class(), "btn btnSecondary");
    let yes = cfg.pages.yes.as_ref().unwrap();
    assert_eq!(yes.actions[1].label_or_default(), "Just vibes");
    let blank = card_core::config::Action::default();
    assert_eq!(blank.label_or_default(), "Continue");
}

#[test]
fn gallery_variant_parse() {
    assert_eq!(GalleryVariant::parse("Stack"), Some(GalleryVariant::Stack));
    assert_eq!(GalleryVariant::parse(" strip "), Some(GalleryVariant::Strip));
    assert_eq!(GalleryVariant::parse("carousel"), None);
    for v in GalleryVariant::ALL {
        assert_eq!(GalleryVariant::parse(v.as_str()), Some(v));
    }
}
