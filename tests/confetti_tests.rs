// Host-side tests for the confetti simulation.

use card_core::constants::{CONFETTI_COLORS, CONFETTI_COUNT};
use card_core::Burst;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn burst(seed: u64) -> Burst {
    let mut rng = StdRng::seed_from_u64(seed);
    Burst::spawn(&mut rng, Vec2::new(800.0, 600.0), CONFETTI_COUNT)
}

#[test]
fn spawns_around_upper_middle() {
    let b = burst(1);
    assert_eq!(b.particles.len(), 170);
    assert!(b.alive());
    assert_eq!(b.frames(), 0);
    for p in &b.particles {
        assert!((p.pos.x - 400.0).abs() <= 70.0);
        assert!((p.pos.y - 200.0).abs() <= 20.0);
        assert!(p.vel.y < -1.9);
        assert!(p.size >= 3.0 && p.size <= 9.0);
        assert!(p.ttl >= 70.0 && p.ttl < 110.0);
        assert!(CONFETTI_COLORS.contains(&p.color));
        assert_eq!(p.alpha(), 1.0);
    }
}

#[test]
fn gravity_pulls_particles_down() {
    let mut b = burst(2);
    let before: Vec<f32> = b.particles.iter().map(|p| p.vel.y).collect();
    b.step();
    for (p, v0) in b.particles.iter().zip(before) {
        assert!((p.vel.y - (v0 + 0.18)).abs() < 1e-4);
        assert_eq!(p.life, 1.0);
    }
    assert_eq!(b.frames(), 1);
}

#[test]
fn alpha_fades_with_age() {
    let mut b = burst(3);
    for _ in 0..35 {
        b.step();
    }
    for p in &b.particles {
        assert!(p.alpha() > 0.0 && p.alpha() < 1.0);
    }
}

#[test]
fn burst_dies_out() {
    let mut b = burst(4);
    for _ in 0..110 {
        b.step();
    }
    assert!(!b.alive());
    assert!(b.particles.iter().all(|p| p.alpha() == 0.0));
    assert_eq!(b.frames(), 110);
}

#[test]
fn empty_burst_is_dead() {
    let mut rng = StdRng::seed_from_u64(5);
    let b = Burst::spawn(&mut rng, Vec2::new(800.0, 600.0), 0);
    assert!(!b.alive());
}
