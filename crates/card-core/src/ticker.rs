//! Single animation driver that dispatches to registered per-frame effects.
//!
//! The host calls [`Ticker::tick`] once per animation frame with a context it
//! owns (the DOM stage on the web, a plain struct in tests). Effects that
//! report [`EffectStatus::Done`] are dropped; the host stops scheduling frames
//! while the ticker is idle.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub now_ms: f64,
    pub dt_ms: f64,
    pub index: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    Continue,
    Done,
}

pub trait Effect<C> {
    fn tick(&mut self, ctx: &mut C, frame: &Frame) -> EffectStatus;
}

impl<C, F> Effect<C> for F
where
    F: FnMut(&mut C, &Frame) -> EffectStatus,
{
    fn tick(&mut self, ctx: &mut C, frame: &Frame) -> EffectStatus {
        self(ctx, frame)
    }
}

struct Slot<C> {
    key: Option<String>,
    effect: Box<dyn Effect<C>>,
}

pub struct Ticker<C> {
    slots: Vec<Slot<C>>,
    last_ms: Option<f64>,
    frames: u64,
}

impl<C> Default for Ticker<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Ticker<C> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            last_ms: None,
            frames: 0,
        }
    }

    /// Register an anonymous effect; several may run side by side.
    pub fn push(&mut self, effect: impl Effect<C> + 'static) {
        self.slots.push(Slot {
            key: None,
            effect: Box::new(effect),
        });
    }

    /// Register an effect under `key`, replacing any effect with the same key.
    pub fn replace(&mut self, key: impl Into<String>, effect: impl Effect<C> + 'static) {
        let key = key.into();
        self.remove(&key);
        self.slots.push(Slot {
            key: Some(key),
            effect: Box::new(effect),
        });
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.key.as_deref() != Some(key));
        self.slots.len() != before
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.iter().any(|s| s.key.as_deref() == Some(key))
    }

    /// Drop every effect, e.g. when the page re-mounts.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.last_ms = None;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_idle(&self) -> bool {
        self.slots.is_empty()
    }

    /// Run one frame. Returns true while effects remain.
    pub fn tick(&mut self, ctx: &mut C, now_ms: f64) -> bool {
        let dt_ms = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        let frame = Frame {
            now_ms,
            dt_ms,
            index: self.frames,
        };
        self.frames += 1;
        self.slots
            .retain_mut(|slot| slot.effect.tick(ctx, &frame) == EffectStatus::Continue);
        if self.slots.is_empty() {
            self.last_ms = None;
        }
        !self.slots.is_empty()
    }
}
