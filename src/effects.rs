//! Per-frame effects registered on the ticker.

use crate::constants::{px, REVEALED_CLASS, VAR_TX, VAR_TY, VISIBLE_CLASS};
use crate::dom;
use crate::frame::Stage;
use crate::input;
use card_core::chase::Kick;
use card_core::config::{Chapter, FloatingItem};
use card_core::confetti::Burst;
use card_core::progress::{self, TrackRect};
use card_core::ticker::{Effect, EffectStatus, Frame};
use card_core::view::ids;
use web_sys as web;

pub struct ConfettiEffect {
    burst: Burst,
}

impl ConfettiEffect {
    pub fn new(burst: Burst) -> Self {
        Self { burst }
    }
}

impl Effect<Stage> for ConfettiEffect {
    fn tick(&mut self, stage: &mut Stage, frame: &Frame) -> EffectStatus {
        let viewport = input::viewport(&stage.window);
        let Some(layer) = stage.confetti.as_mut() else {
            return EffectStatus::Done;
        };
        layer.begin(frame, viewport);
        self.burst.step();

        let ctx = &layer.ctx;
        for p in &self.burst.particles {
            let s = p.size as f64;
            ctx.save();
            ctx.set_global_alpha(p.alpha() as f64);
            let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = ctx.rotate(p.rot as f64);
            ctx.set_fill_style_str(p.color);
            ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
            ctx.restore();
        }

        // Dead particles draw at zero alpha, so the last frame leaves the canvas clear.
        if self.burst.alive() {
            EffectStatus::Continue
        } else {
            log::debug!("[confetti] burst done after {} frames", self.burst.frames());
            EffectStatus::Done
        }
    }
}

/// Decays a chase button's dodge kick back to rest.
pub struct KickEffect {
    el: web::Element,
    kick: Kick,
}

impl KickEffect {
    pub fn new(el: web::Element, kick: Kick) -> Self {
        Self { el, kick }
    }
}

impl Effect<Stage> for KickEffect {
    fn tick(&mut self, _stage: &mut Stage, frame: &Frame) -> EffectStatus {
        let offset = self.kick.offset_at(frame.now_ms);
        dom::set_style(&self.el, VAR_TX, &px(offset.x));
        dom::set_style(&self.el, VAR_TY, &px(offset.y));
        if self.kick.finished(frame.now_ms) {
            EffectStatus::Done
        } else {
            EffectStatus::Continue
        }
    }
}

/// Scroll-stack cards fade in once enough of them is on screen.
pub struct RevealEffect {
    pending: Vec<web::Element>,
}

impl RevealEffect {
    pub fn new(cards: Vec<web::Element>) -> Self {
        Self { pending: cards }
    }
}

impl Effect<Stage> for RevealEffect {
    fn tick(&mut self, stage: &mut Stage, _frame: &Frame) -> EffectStatus {
        let vh = input::viewport(&stage.window).y;
        self.pending.retain(|card| {
            if progress::is_revealed(input::track_rect(card), vh) {
                dom::set_class(card, VISIBLE_CLASS, true);
                false
            } else {
                true
            }
        });
        if self.pending.is_empty() {
            EffectStatus::Done
        } else {
            EffectStatus::Continue
        }
    }
}

struct ChapterTrack {
    id: String,
    el: web::Element,
    gallery: Vec<web::Element>,
    revealed: usize,
}

struct FloatSprite {
    item: FloatingItem,
    el: web::Element,
}

/// Chapter progress: pill label, floating sprites and gallery reveal.
pub struct ProgressEffect {
    tracks: Vec<ChapterTrack>,
    floats: Vec<FloatSprite>,
    pill: Option<web::Element>,
    pill_text: String,
}

impl ProgressEffect {
    pub fn new(document: &web::Document, chapters: &[Chapter], floating: &[FloatingItem]) -> Self {
        let tracks = chapters
            .iter()
            .filter_map(|ch| {
                let el = document.get_element_by_id(&ids::chapter(ch.id()))?;
                let n = ch.gallery.as_ref().map_or(0, |g| g.items.len());
                let gallery = (0..n)
                    .filter_map(|i| document.get_element_by_id(&ids::gallery_item(ch.id(), i)))
                    .collect();
                Some(ChapterTrack {
                    id: ch.id().to_string(),
                    el,
                    gallery,
                    revealed: 0,
                })
            })
            .collect();
        let floats = floating
            .iter()
            .filter_map(|item| {
                let el = document.get_element_by_id(&ids::float(&item.id))?;
                Some(FloatSprite {
                    item: item.clone(),
                    el,
                })
            })
            .collect();
        Self {
            tracks,
            floats,
            pill: document.get_element_by_id(ids::PROGRESS_PILL),
            pill_text: String::new(),
        }
    }
}

impl Effect<Stage> for ProgressEffect {
    fn tick(&mut self, stage: &mut Stage, _frame: &Frame) -> EffectStatus {
        let vh = input::viewport(&stage.window).y;
        let rects: Vec<TrackRect> = self.tracks.iter().map(|t| input::track_rect(&t.el)).collect();
        let progress: Vec<f32> = rects.iter().map(|r| progress::track_progress(*r, vh)).collect();

        if let (Some(pill), Some(best)) = (&self.pill, progress::most_visible(&rects, vh)) {
            let label = progress::pill_label(&self.tracks[best].id, progress[best]);
            if label != self.pill_text {
                pill.set_text_content(Some(label.as_str()));
                self.pill_text = label;
            }
        }

        let tracks = &self.tracks;
        let progress_of = |id: &str| {
            tracks
                .iter()
                .position(|t| t.id == id)
                .map_or(0.0, |i| progress[i])
        };
        for f in &self.floats {
            let pose = progress::float_pose(&f.item, progress::float_progress(&f.item, &progress_of));
            let opacity = pose.opacity.to_string();
            dom::set_style(&f.el, "--op", &opacity);
            dom::set_style(&f.el, "opacity", &opacity);
            dom::set_style(&f.el, "transform", &pose.css());
        }

        for (t, p) in self.tracks.iter_mut().zip(&progress) {
            let n = progress::gallery_revealed(*p, t.gallery.len());
            if n != t.revealed {
                for (i, item) in t.gallery.iter().enumerate() {
                    dom::set_class(item, REVEALED_CLASS, i < n);
                }
                t.revealed = n;
            }
        }
        EffectStatus::Continue
    }
}
