//! Scroll progress and the interpolation it drives.
//!
//! Everything here is a pure function of measured geometry, so the web layer
//! only has to read bounding rects and write the results back as styles.

use crate::config::{FloatingItem, Transform};
use crate::constants::REVEAL_THRESHOLD;

#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Vertical extent of a track relative to the viewport top (CSS px).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackRect {
    pub top: f32,
    pub height: f32,
}

impl TrackRect {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Normalized progress through a pinned track.
///
/// Tracks shorter than the viewport use a denominator of 1 so the value
/// jumps cleanly instead of dividing by zero or a negative.
pub fn track_progress(rect: TrackRect, viewport_h: f32) -> f32 {
    let total = (rect.height - viewport_h).max(1.0);
    clamp01(-rect.top / total)
}

/// Higher is more visible; used to pick the chapter shown in the progress pill.
pub fn visibility_score(rect: TrackRect, viewport_h: f32) -> f32 {
    -rect.top.abs() + (rect.bottom() - viewport_h).min(0.0)
}

/// Index of the most visible track, ties resolved to the earliest.
pub fn most_visible(rects: &[TrackRect], viewport_h: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, r) in rects.iter().enumerate() {
        let score = visibility_score(*r, viewport_h);
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

pub fn pill_label(id: &str, t: f32) -> String {
    format!("{} · {}%", id.to_uppercase(), (clamp01(t) * 100.0).round() as u32)
}

impl Transform {
    /// Field-wise linear interpolation.
    pub fn lerp(&self, to: &Transform, t: f32) -> Transform {
        Transform {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            rot: lerp(self.rot, to.rot, t),
            scale: lerp(self.scale, to.scale, t),
            opacity: lerp(self.opacity, to.opacity, t),
        }
    }

    /// CSS transform for a sprite centred on its anchor.
    pub fn css(&self) -> String {
        format!(
            "translate(-50%, -50%) translate({:.0}px, {:.0}px) rotate({:.1}deg) scale({:.3})",
            self.x, self.y, self.rot, self.scale
        )
    }
}

/// Progress used to pose a floating sprite: the chapter's own progress, or
/// the mean of both ends when it spans two chapters.
pub fn float_progress(item: &FloatingItem, progress_of: impl Fn(&str) -> f32) -> f32 {
    match item.range() {
        None => 0.0,
        Some((from, to)) if from == to => progress_of(from),
        Some((from, to)) => clamp01((progress_of(from) + progress_of(to)) * 0.5),
    }
}

/// Pose of a floating sprite at progress `t` (opacity clamped for CSS).
pub fn float_pose(item: &FloatingItem, t: f32) -> Transform {
    let mut pose = item.from.lerp(&item.to, clamp01(t));
    pose.opacity = clamp01(pose.opacity);
    pose
}

/// How many of `n` gallery items are revealed at progress `t`.
///
/// Item `i` appears once `t >= (i + 1) / (n + 1)`, so nothing shows at the
/// top of the track and everything shows by the end.
pub fn gallery_revealed(t: f32, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let steps = (clamp01(t) * (n as f32 + 1.0)).floor() as usize;
    steps.min(n)
}

/// Scroll-stack reveal: true once enough of the card is inside the viewport.
pub fn is_revealed(rect: TrackRect, viewport_h: f32) -> bool {
    if rect.height <= 0.0 {
        return false;
    }
    let visible = (rect.bottom().min(viewport_h) - rect.top.max(0.0)).max(0.0);
    visible / rect.height >= REVEAL_THRESHOLD
}
