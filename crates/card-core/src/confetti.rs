//! Confetti particle simulation. Frame-stepped, no rendering.

use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::PI;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rot: f32,
    pub vr: f32,
    pub color: &'static str,
    pub life: f32,
    pub ttl: f32,
}

impl Particle {
    pub fn alive(&self) -> bool {
        self.life < self.ttl
    }

    pub fn alpha(&self) -> f32 {
        (1.0 - self.life / self.ttl).max(0.0)
    }
}

/// One burst of particles; bursts are independent and may overlap.
#[derive(Clone, Debug)]
pub struct Burst {
    pub particles: Vec<Particle>,
    frames: u32,
}

impl Burst {
    /// Spawn `count` particles around the upper-middle of a `viewport` (CSS px).
    pub fn spawn(rng: &mut impl Rng, viewport: Vec2, count: usize) -> Self {
        let origin = Vec2::new(viewport.x * 0.5, viewport.y / 3.0);
        let particles = (0..count)
            .map(|_| Particle {
                pos: origin
                    + Vec2::new(
                        (rng.gen::<f32>() - 0.5) * CONFETTI_SPREAD_X,
                        (rng.gen::<f32>() - 0.5) * CONFETTI_SPREAD_Y,
                    ),
                vel: Vec2::new((rng.gen::<f32>() - 0.5) * 10.0, -rng.gen::<f32>() * 10.0 - 2.0),
                size: rng.gen::<f32>() * 6.0 + 3.0,
                rot: rng.gen::<f32>() * PI,
                vr: (rng.gen::<f32>() - 0.5) * 0.3,
                color: CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())],
                life: 0.0,
                ttl: rng.gen::<f32>() * CONFETTI_TTL_SPAN + CONFETTI_TTL_MIN,
            })
            .collect();
        Self {
            particles,
            frames: 0,
        }
    }

    /// Advance one frame: gravity, position, spin, age.
    pub fn step(&mut self) {
        self.frames += 1;
        for p in &mut self.particles {
            p.life += 1.0;
            p.vel.y += CONFETTI_GRAVITY;
            p.pos += p.vel;
            p.rot += p.vr;
        }
    }

    pub fn alive(&self) -> bool {
        self.particles.iter().any(Particle::alive)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
