// Shared fixture for the host-side card tests.

#![allow(dead_code)]

use card_core::CardConfig;

pub const SAMPLE: &str = r##"{
  "pageTitle": "For you",
  "badgeText": "Happy Valentine's",
  "hintText": "Tap a button to continue",
  "images": {
    "hero": "img/hero.jpg",
    "beach": "img/beach.jpg",
    "heart": "img/heart.png"
  },
  "scenes": [
    {
      "id": "intro",
      "title": "Hey you",
      "subtitle": "I made you something",
      "body": ["It is small.", "But it is yours."],
      "imageKey": "hero",
      "imageAlt": "Us",
      "actions": [{ "label": "Open it", "to": "question" }]
    },
    {
      "id": "question",
      "title": "So...",
      "actions": [
        { "label": "Yes", "to": "yes" },
        { "label": "No", "to": "no", "variant": "secondary", "runaway": true }
      ]
    },
    {
      "id": "yes",
      "title": "Yay!",
      "confetti": true,
      "actions": [
        { "label": "Again", "onClick": "restart" },
        { "label": "Read the letter", "href": "https://example.com/letter" },
        { "label": "Stay here" }
      ]
    },
    {
      "id": "no",
      "title": "That's okay",
      "actions": [{ "label": "Back", "to": "intro" }]
    }
  ],
  "chapters": [
    {
      "id": "hello",
      "title": "How it started",
      "body": ["A long time ago."],
      "trackVh": 50,
      "gallery": {
        "items": [
          { "imageKey": "beach", "alt": "Beach", "caption": "That summer" },
          { "src": "img/direct.jpg", "alt": "Direct" },
          { "imageKey": "missing", "alt": "Nothing" }
        ]
      }
    },
    {
      "id": "ask",
      "title": "Will you?",
      "layout": "question",
      "trackVh": 200,
      "confetti": true
    }
  ],
  "floating": [
    {
      "id": "heart",
      "imageKey": "heart",
      "widthPx": 10,
      "from": { "x": 0, "y": 0, "opacity": 0 },
      "to": { "x": 100, "y": -40, "rot": 30, "scale": 2, "opacity": 2 },
      "chapterRange": ["hello", "ask"]
    },
    {
      "id": "solo",
      "src": "img/solo.png",
      "chapterRange": ["ask"]
    },
    {
      "id": "idle"
    }
  ],
  "chase": {
    "yesDodges": 3,
    "noDodges": 2,
    "taunts": ["Too slow!", "Almost!"]
  },
  "runawayNo": {
    "enabled": true,
    "maxDodges": 2,
    "scrollPerDodgePx": 40
  },
  "pages": {
    "question": {
      "title": "Be mine?",
      "noConfirm": {
        "prompts": ["Are you sure?", "Really sure?"],
        "noLabelDuring": "Still no",
        "yesLabelDuring": "Fine, yes"
      }
    },
    "yes": {
      "title": "Best answer",
      "confetti": true,
      "actions": [
        { "label": "Home", "href": "index.html" },
        { "label": "Just vibes" }
      ]
    }
  }
}"##;

pub fn sample() -> CardConfig {
    CardConfig::from_json(SAMPLE).unwrap()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
