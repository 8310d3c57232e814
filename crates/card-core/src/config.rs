//! Declarative card configuration.
//!
//! The whole card (copy, images, flow, behaviour flags) is described by one
//! JSON document that is parsed and validated once at startup. The resulting
//! [`CardConfig`] is immutable and passed explicitly to everything that needs
//! it.

use crate::constants::*;
use crate::error::{CardError, Result};
use fnv::{FnvHashMap, FnvHashSet};
use serde::Deserialize;

fn yes() -> bool {
    true
}

fn one() -> f32 {
    1.0
}

/// Presentation used when the page carries no specific `data-page` identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Scroll,
    Scrolly,
    #[default]
    #[serde(other)]
    Single,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Secondary,
    #[default]
    #[serde(other)]
    Primary,
}

impl Variant {
    pub fn class(self) -> &'static str {
        match self {
            Variant::Primary => "btn btnPrimary",
            Variant::Secondary => "btn btnSecondary",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickHook {
    Restart,
    #[serde(other)]
    Unknown,
}

/// A button descriptor. `to` names another scene/chapter, `href` leaves the page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Action {
    pub label: String,
    pub to: Option<String>,
    pub href: Option<String>,
    pub variant: Variant,
    pub on_click: Option<ClickHook>,
    pub runaway: bool,
}

impl Action {
    pub fn label_or_default(&self) -> &str {
        if self.label.is_empty() {
            "Continue"
        } else {
            &self.label
        }
    }

    pub fn targets(&self, id: &str) -> bool {
        self.to.as_deref() == Some(id)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub image_key: Option<String>,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub confetti: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Question,
    #[default]
    #[serde(other)]
    Split,
}

/// Gallery presentation; overridable from the `gallery` query parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryVariant {
    #[default]
    Grid,
    Stack,
    Strip,
}

impl GalleryVariant {
    pub const ALL: [GalleryVariant; 3] = [
        GalleryVariant::Grid,
        GalleryVariant::Stack,
        GalleryVariant::Strip,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Some(GalleryVariant::Grid),
            "stack" => Some(GalleryVariant::Stack),
            "strip" => Some(GalleryVariant::Strip),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GalleryVariant::Grid => "grid",
            GalleryVariant::Stack => "stack",
            GalleryVariant::Strip => "strip",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryItem {
    pub image_key: Option<String>,
    pub src: Option<String>,
    pub alt: String,
    pub caption: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gallery {
    pub items: Vec<GalleryItem>,
    pub variant: Option<GalleryVariant>,
}

/// A scroll-pinned section: scene content plus track and layout settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(flatten)]
    pub content: Scene,
    #[serde(default)]
    track_vh: Option<f32>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub gallery: Option<Gallery>,
    #[serde(default = "yes")]
    pub show_badge: bool,
}

impl Chapter {
    pub fn id(&self) -> &str {
        &self.content.id
    }

    /// Track height in vh, never shorter than the pinned minimum.
    pub fn track_vh(&self) -> f32 {
        self.track_vh.unwrap_or(TRACK_VH_DEFAULT).max(TRACK_VH_MIN)
    }
}

/// Numeric pose of a floating sprite.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rot: f32,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default = "one")]
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rot: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingItem {
    pub id: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub image_key: Option<String>,
    #[serde(default)]
    width_px: Option<f32>,
    #[serde(default)]
    pub from: Transform,
    #[serde(default)]
    pub to: Transform,
    #[serde(default)]
    pub chapter_range: Vec<String>,
}

impl FloatingItem {
    pub fn width_px(&self) -> f32 {
        self.width_px
            .unwrap_or(FLOAT_WIDTH_DEFAULT)
            .max(FLOAT_WIDTH_MIN)
    }

    /// `(from, to)` chapter ids; a single entry spans one chapter.
    pub fn range(&self) -> Option<(&str, &str)> {
        let from = self.chapter_range.first()?;
        let to = self.chapter_range.get(1).unwrap_or(from);
        Some((from.as_str(), to.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChaseConfig {
    pub enabled: bool,
    pub yes_dodges: u32,
    pub no_dodges: u32,
    trigger_radius_px: f32,
    dodge_distance_px: f32,
    pub taunts: Vec<String>,
    pub taunts_file: Option<String>,
    pub yes_taunts_file: Option<String>,
    pub no_taunts_file: Option<String>,
    pub show_serious_links: bool,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            yes_dodges: 0,
            no_dodges: 0,
            trigger_radius_px: CHASE_RADIUS_DEFAULT,
            dodge_distance_px: CHASE_DODGE_DEFAULT,
            taunts: Vec::new(),
            taunts_file: None,
            yes_taunts_file: None,
            no_taunts_file: None,
            show_serious_links: true,
        }
    }
}

impl ChaseConfig {
    pub fn trigger_radius(&self) -> f32 {
        self.trigger_radius_px.max(CHASE_RADIUS_MIN)
    }

    pub fn dodge_distance(&self) -> f32 {
        self.dodge_distance_px.max(CHASE_DODGE_MIN)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunawayNoConfig {
    pub enabled: bool,
    pub max_dodges: u32,
    pub stop_after_max_dodges: bool,
    pub scroll_per_dodge_px: f32,
}

impl Default for RunawayNoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_dodges: 0,
            stop_after_max_dodges: true,
            scroll_per_dodge_px: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoConfirmConfig {
    pub prompts: Vec<String>,
    pub prompts_file: Option<String>,
    pub yes_scale_start: f32,
    pub yes_scale_step: f32,
    pub no_scale_step: f32,
    pub no_label_during: Option<String>,
    pub yes_label_during: Option<String>,
    pub final_no_taunt: String,
}

impl Default for NoConfirmConfig {
    fn default() -> Self {
        Self {
            prompts: Vec::new(),
            prompts_file: None,
            yes_scale_start: YES_SCALE_START_DEFAULT,
            yes_scale_step: YES_SCALE_STEP_DEFAULT,
            no_scale_step: NO_SCALE_STEP_DEFAULT,
            no_label_during: None,
            yes_label_during: None,
            final_no_taunt: "Okay 💛".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cta {
    pub title: String,
    pub subtitle: String,
    pub label: String,
    pub href: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryPage {
    pub chapters: Vec<Chapter>,
    pub cta: Option<Cta>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPage {
    pub title: String,
    pub subtitle: String,
    pub body: Vec<String>,
    pub yes_label: String,
    pub no_label: String,
    pub yes_href: String,
    pub no_href: String,
    pub no_confirm: NoConfirmConfig,
}

impl Default for QuestionPage {
    fn default() -> Self {
        Self {
            title: "Will you be my Valentine?".to_string(),
            subtitle: String::new(),
            body: Vec::new(),
            yes_label: "Yes 💖".to_string(),
            no_label: "Not this time".to_string(),
            yes_href: "yes.html".to_string(),
            no_href: "no.html".to_string(),
            no_confirm: NoConfirmConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePage {
    pub title: String,
    pub subtitle: String,
    pub body: Vec<String>,
    pub image_key: Option<String>,
    pub image_alt: String,
    pub actions: Vec<Action>,
    pub confetti: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pages {
    pub story: Option<StoryPage>,
    pub question: Option<QuestionPage>,
    pub yes: Option<ResponsePage>,
    pub no: Option<ResponsePage>,
}

/// The complete, validated card description.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardConfig {
    pub page_title: String,
    pub badge_text: String,
    pub hint_text: String,
    pub allow_no: bool,
    pub mode: Mode,
    pub reveal_on_scroll: bool,
    pub images: FnvHashMap<String, String>,
    pub scenes: Vec<Scene>,
    pub chapters: Vec<Chapter>,
    pub floating: Vec<FloatingItem>,
    pub chase: ChaseConfig,
    pub runaway_no: RunawayNoConfig,
    pub pages: Pages,
    pub gallery_variant: GalleryVariant,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            page_title: String::new(),
            badge_text: String::new(),
            hint_text: String::new(),
            allow_no: true,
            mode: Mode::Single,
            reveal_on_scroll: true,
            images: FnvHashMap::default(),
            scenes: Vec::new(),
            chapters: Vec::new(),
            floating: Vec::new(),
            chase: ChaseConfig::default(),
            runaway_no: RunawayNoConfig::default(),
            pages: Pages::default(),
            gallery_variant: GalleryVariant::Grid,
        }
    }
}

impl CardConfig {
    /// Parse and validate a JSON card description.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(CardError::MissingConfig("config document is empty".into()));
        }
        let cfg: CardConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scenes.is_empty() {
            return Err(CardError::NoScenes);
        }
        unique_ids("scene", self.scenes.iter().map(|s| s.id.as_str()))?;
        unique_ids("chapter", self.chapters.iter().map(Chapter::id))?;
        if let Some(story) = &self.pages.story {
            unique_ids("story chapter", story.chapters.iter().map(Chapter::id))?;
        }
        unique_ids("floating item", self.floating.iter().map(|f| f.id.as_str()))?;

        let scene_ids: FnvHashSet<&str> = self.scenes.iter().map(|s| s.id.as_str()).collect();
        for scene in &self.scenes {
            for action in &scene.actions {
                if let Some(to) = action.to.as_deref() {
                    if !scene_ids.contains(to) {
                        log::warn!("[config] scene `{}` links to unknown scene `{}`", scene.id, to);
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve an image key against the `images` table.
    pub fn image_src(&self, key: Option<&str>) -> Option<&str> {
        key.and_then(|k| self.images.get(k)).map(String::as_str)
    }

    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id() == id)
    }

}

fn unique_ids<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = FnvHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(CardError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
