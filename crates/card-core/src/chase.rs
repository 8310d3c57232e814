//! Pointer-chase game for the Yes/No buttons, plus the No confirm loop.
//!
//! One parameterized component serves both the question chapter and the
//! question page. Geometry comes in as client-space rects measured by the web
//! layer; results come back as positions, kicks and taunt text to apply.

use crate::config::{ChaseConfig, NoConfirmConfig, RunawayNoConfig};
use crate::constants::*;
use crate::lines::LineDeck;
use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;

pub const REDUCED_MOTION_TAUNT: &str = "(Reduced motion is on — chase disabled.)";
const FALLBACK_TAUNT: &str = "Hehe.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Yes => "yes",
            Side::No => "no",
        }
    }

    fn slot(self) -> usize {
        match self {
            Side::Yes => 0,
            Side::No => 1,
        }
    }

    fn give_up_line(self) -> &'static str {
        match self {
            Side::Yes => "Okay okay — click me 😌",
            Side::No => "Alright, you can click me now.",
        }
    }
}

/// Axis-aligned rect in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Measured geometry of the chase zone and its buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoneGeometry {
    pub zone: Rect,
    pub yes: Option<Rect>,
    pub no: Option<Rect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonState {
    pub dodges: u32,
    pub max: u32,
    pub given_up: bool,
}

impl ButtonState {
    pub fn new(max: u32) -> Self {
        Self {
            dodges: 0,
            max,
            given_up: max == 0,
        }
    }
}

/// One relocation of a chased button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dodge {
    pub side: Side,
    /// New `left`/`top` inside the zone (px).
    pub position: Vec2,
    /// Transient offset to decay back to zero; zero once given up.
    pub kick: Vec2,
    pub gave_up: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Still evading: a taunt was shown instead of acting.
    Taunt,
    Proceed,
}

/// Text shown by the HUD before any interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChaseHost {
    Chapter,
    Page,
}

impl ChaseHost {
    fn intro_hint(self) -> &'static str {
        match self {
            ChaseHost::Chapter => "(Tip: move your cursor near the buttons.)",
            ChaseHost::Page => "(Move near the buttons…)",
        }
    }
}

pub struct ChaseGame {
    enabled: bool,
    radius: f32,
    dodge_distance: f32,
    buttons: [Option<ButtonState>; 2],
    shared: LineDeck,
    per_side: [Option<LineDeck>; 2],
    serious_links: bool,
    taunt: String,
    rng: StdRng,
}

impl ChaseGame {
    /// `with_no` is false when the No button is not rendered (`allowNo = false`).
    pub fn new(
        cfg: &ChaseConfig,
        host: ChaseHost,
        with_no: bool,
        serious_links: bool,
        reduced_motion: bool,
        seed: u64,
    ) -> Self {
        let enabled = cfg.enabled && !reduced_motion;
        let mut yes = ButtonState::new(cfg.yes_dodges);
        let mut no = ButtonState::new(cfg.no_dodges);
        if !enabled {
            yes.given_up = true;
            no.given_up = true;
        }
        let taunt = if enabled {
            host.intro_hint()
        } else {
            REDUCED_MOTION_TAUNT
        };
        Self {
            enabled,
            radius: cfg.trigger_radius(),
            dodge_distance: cfg.dodge_distance(),
            buttons: [Some(yes), with_no.then_some(no)],
            shared: LineDeck::with_fallback(cfg.taunts.clone(), FALLBACK_TAUNT),
            per_side: [None, None],
            serious_links,
            taunt: taunt.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn taunt(&self) -> &str {
        &self.taunt
    }

    pub fn state(&self, side: Side) -> Option<&ButtonState> {
        self.buttons[side.slot()].as_ref()
    }

    /// Swap in lines loaded from a taunts file, unless taunts were already shown.
    pub fn override_taunts(&mut self, side: Option<Side>, lines: Vec<String>) -> bool {
        match side {
            None => self.shared.override_lines(lines),
            Some(s) => {
                if self.shared.used() || lines.is_empty() {
                    return false;
                }
                self.per_side[s.slot()] = Some(LineDeck::new(lines));
                true
            }
        }
    }

    /// Handle a pointer move/press at `pointer`; returns every button that dodged.
    pub fn pointer(&mut self, pointer: Vec2, geo: &ZoneGeometry) -> SmallVec<[Dodge; 2]> {
        let mut out = SmallVec::new();
        if !self.enabled {
            return out;
        }
        for (side, rect) in [(Side::Yes, geo.yes), (Side::No, geo.no)] {
            let Some(rect) = rect else { continue };
            if pointer.distance(rect.center()) <= self.radius {
                if let Some(d) = self.dodge(side, geo.zone, rect) {
                    out.push(d);
                }
            }
        }
        out
    }

    fn dodge(&mut self, side: Side, zone: Rect, button: Rect) -> Option<Dodge> {
        let (dodges, max, gave_up) = {
            let state = self.buttons[side.slot()].as_mut()?;
            if state.given_up {
                return None;
            }
            state.dodges += 1;
            state.given_up = state.dodges >= state.max;
            (state.dodges, state.max, state.given_up)
        };

        let margin = CHASE_ZONE_MARGIN;
        let max_left = (zone.size.x - button.size.x - margin).max(margin);
        let max_top = (zone.size.y - button.size.y - margin).max(margin);
        let position = Vec2::new(
            margin + self.rng.gen::<f32>() * (max_left - margin).max(1.0),
            margin + self.rng.gen::<f32>() * (max_top - margin).max(1.0),
        );

        let kick = if gave_up {
            self.taunt = side.give_up_line().to_string();
            Vec2::ZERO
        } else {
            self.advance_taunt(side);
            let d = self.dodge_distance;
            Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0 * d,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * d * CHASE_DODGE_Y_RATIO,
            )
        };
        log::debug!("[chase] {} dodge {}/{}", side.as_str(), dodges, max);
        Some(Dodge {
            side,
            position,
            kick,
            gave_up,
        })
    }

    fn advance_taunt(&mut self, side: Side) {
        self.shared.mark_used();
        let deck = match self.per_side[side.slot()].as_mut() {
            Some(d) => d,
            None => &mut self.shared,
        };
        if let Some(line) = deck.advance() {
            self.taunt = line.to_string();
        }
    }

    /// Click on a chased button: a taunt while it is still evading.
    pub fn click(&mut self, side: Side) -> ClickOutcome {
        let given_up = self.state(side).map_or(true, |s| s.given_up);
        if self.enabled && !given_up {
            self.taunt = match side {
                Side::Yes => "Nice try 😌",
                Side::No if self.serious_links => "If you really mean no, use the serious link 💛",
                Side::No => "Not yet 😅",
            }
            .to_string();
            return ClickOutcome::Taunt;
        }
        ClickOutcome::Proceed
    }

    pub fn set_taunt(&mut self, text: impl Into<String>) {
        self.taunt = text.into();
    }
}

/// A dodge kick decaying linearly to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kick {
    pub vector: Vec2,
    pub started_ms: f64,
}

impl Kick {
    pub fn offset_at(&self, now_ms: f64) -> Vec2 {
        kick_offset(self.vector, now_ms - self.started_ms)
    }

    pub fn finished(&self, now_ms: f64) -> bool {
        now_ms - self.started_ms >= KICK_DECAY_MS
    }
}

pub fn kick_offset(kick: Vec2, elapsed_ms: f64) -> Vec2 {
    let remaining = (1.0 - elapsed_ms / KICK_DECAY_MS).clamp(0.0, 1.0) as f32;
    kick * remaining
}

/// What the No button does on the question page once it is clickable.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmStep {
    Prompt {
        text: String,
        yes_scale: f32,
        no_scale: f32,
        yes_label: Option<String>,
        no_label: Option<String>,
    },
    /// Final answer: show the taunt, then leave after `delay_ms`.
    Leave { taunt: String, delay_ms: i32 },
    /// No prompts configured: leave immediately.
    Proceed,
}

pub struct ConfirmLoop {
    prompts: LineDeck,
    next: usize,
    cfg: NoConfirmConfig,
    yes_scale: f32,
}

impl ConfirmLoop {
    pub fn new(cfg: &NoConfirmConfig) -> Self {
        Self {
            prompts: LineDeck::new(cfg.prompts.clone()),
            next: 0,
            yes_scale: cfg.yes_scale_start,
            cfg: cfg.clone(),
        }
    }

    pub fn yes_scale(&self) -> f32 {
        self.yes_scale
    }

    pub fn override_prompts(&mut self, lines: Vec<String>) -> bool {
        let replaced = self.prompts.override_lines(lines);
        if replaced {
            self.next = 0;
        }
        replaced
    }

    pub fn on_no(&mut self) -> ConfirmStep {
        if self.prompts.is_empty() {
            return ConfirmStep::Proceed;
        }
        if self.next >= self.prompts.len() {
            return ConfirmStep::Leave {
                taunt: self.cfg.final_no_taunt.clone(),
                delay_ms: FINAL_NO_DELAY_MS,
            };
        }
        let idx = self.next;
        self.next += 1;
        self.prompts.mark_used();
        let step = (idx + 1) as f32;
        self.yes_scale = (self.cfg.yes_scale_start + step * self.cfg.yes_scale_step).min(YES_SCALE_MAX);
        let no_scale = (1.0 - step * self.cfg.no_scale_step).max(NO_SCALE_MIN);
        ConfirmStep::Prompt {
            text: self.prompts.get(idx).unwrap_or_default().to_string(),
            yes_scale: self.yes_scale,
            no_scale,
            yes_label: self.cfg.yes_label_during.clone(),
            no_label: self.cfg.no_label_during.clone(),
        }
    }
}

/// Bounce keyframes `(delay_ms, scale)` ending on `base`.
pub fn pop_sequence(base: f32) -> [(i32, f32); 3] {
    [
        (0, base + POP_UP_DELTA),
        (POP_STEP_MS, (base - POP_DOWN_DELTA).max(NO_SCALE_MIN)),
        (POP_STEP_MS * 2, base),
    ]
}

/// Offset jump of the scroll-stack runaway No button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunawayJump {
    pub offset: Vec2,
    pub scroll_by: f32,
}

pub struct Runaway {
    dodges: u32,
    cfg: RunawayNoConfig,
    rng: StdRng,
}

impl Runaway {
    pub fn new(cfg: &RunawayNoConfig, seed: u64) -> Self {
        Self {
            dodges: 0,
            cfg: cfg.clone(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn dodge(&mut self, viewport_w: f32) -> Option<RunawayJump> {
        if self.cfg.stop_after_max_dodges && self.dodges >= self.cfg.max_dodges {
            return None;
        }
        self.dodges += 1;
        let max_x = (viewport_w * RUNAWAY_MAX_X_VIEWPORT_RATIO).clamp(RUNAWAY_MAX_X_MIN, RUNAWAY_MAX_X_MAX);
        let dx = (self.rng.gen::<f32>() - 0.5) * 2.0 * max_x;
        let dy = (self.rng.gen::<f32>() - 0.25) * 2.0 * RUNAWAY_MAX_Y;
        Some(RunawayJump {
            offset: Vec2::new(dx.round(), dy.round()),
            scroll_by: self.cfg.scroll_per_dodge_px.max(0.0),
        })
    }
}
