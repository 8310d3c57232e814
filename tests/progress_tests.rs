// Host-side tests for scroll progress math.

mod common;

use card_core::config::Transform;
use card_core::progress::*;
use common::{approx, sample};

fn rect(top: f32, height: f32) -> TrackRect {
    TrackRect { top, height }
}

#[test]
fn clamp_and_lerp() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
}

#[test]
fn track_progress_through_pinned_track() {
    let vh = 1000.0;
    assert_eq!(track_progress(rect(200.0, 2000.0), vh), 0.0);
    assert_eq!(track_progress(rect(0.0, 2000.0), vh), 0.0);
    assert!(approx(track_progress(rect(-500.0, 2000.0), vh), 0.5));
    assert_eq!(track_progress(rect(-1000.0, 2000.0), vh), 1.0);
    assert_eq!(track_progress(rect(-5000.0, 2000.0), vh), 1.0);
}

#[test]
fn short_track_does_not_divide_by_zero() {
    let vh = 1000.0;
    assert_eq!(track_progress(rect(-3.0, 1000.0), vh), 1.0);
    assert_eq!(track_progress(rect(-3.0, 400.0), vh), 1.0);
    assert_eq!(track_progress(rect(10.0, 400.0), vh), 0.0);
    assert!(approx(track_progress(rect(-0.5, 1000.0), vh), 0.5));
}

#[test]
fn most_visible_picks_closest_track() {
    let vh = 1000.0;
    let rects = [rect(-800.0, 1600.0), rect(200.0, 1600.0)];
    assert_eq!(most_visible(&rects, vh), Some(1));
    let rects = [rect(-100.0, 1600.0), rect(900.0, 1600.0)];
    assert_eq!(most_visible(&rects, vh), Some(0));
    let tie = [rect(0.0, 1600.0), rect(0.0, 1600.0)];
    assert_eq!(most_visible(&tie, vh), Some(0));
    assert_eq!(most_visible(&[], vh), None);
}

#[test]
fn pill_label_format() {
    assert_eq!(pill_label("ask", 0.456), "ASK · 46%");
    assert_eq!(pill_label("hello", 0.0), "HELLO · 0%");
    assert_eq!(pill_label("hello", 3.0), "HELLO · 100%");
}

#[test]
fn transform_interpolation() {
    let from = Transform::default();
    let to = Transform {
        x: 100.0,
        y: -50.0,
        rot: 90.0,
        scale: 3.0,
        opacity: 0.0,
    };
    let mid = from.lerp(&to, 0.5);
    assert!(approx(mid.x, 50.0));
    assert!(approx(mid.y, -25.0));
    assert!(approx(mid.rot, 45.0));
    assert!(approx(mid.scale, 2.0));
    assert!(approx(mid.opacity, 0.5));
    assert_eq!(
        Transform::default().css(),
        "translate(-50%, -50%) translate(0px, 0px) rotate(0.0deg) scale(1.000)"
    );
}

#[test]
fn float_progress_spans_chapters() {
    let cfg = sample();
    let progress = |id: &str| match id {
        "hello" => 0.2,
        "ask" => 0.6,
        _ => 0.0,
    };
    assert!(approx(float_progress(&cfg.floating[0], progress), 0.4));
    assert!(approx(float_progress(&cfg.floating[1], progress), 0.6));
    assert_eq!(float_progress(&cfg.floating[2], progress), 0.0);
}

#[test]
fn float_pose_clamps() {
    let cfg = sample();
    let heart = &cfg.floating[0];
    let half = float_pose(heart, 0.5);
    assert!(approx(half.x, 50.0));
    assert!(approx(half.y, -20.0));
    assert!(approx(half.opacity, 1.0));
    let end = float_pose(heart, 4.0);
    assert!(approx(end.x, 100.0));
    assert!(approx(end.opacity, 1.0));
    let start = float_pose(heart, -1.0);
    assert!(approx(start.opacity, 0.0));
}

#[test]
fn gallery_reveals_in_steps() {
    assert_eq!(gallery_revealed(0.0, 3), 0);
    assert_eq!(gallery_revealed(0.2, 3), 0);
    assert_eq!(gallery_revealed(0.25, 3), 1);
    assert_eq!(gallery_revealed(0.5, 3), 2);
    assert_eq!(gallery_revealed(0.8, 3), 3);
    assert_eq!(gallery_revealed(1.0, 3), 3);
    assert_eq!(gallery_revealed(0.7, 0), 0);
}

#[test]
fn reveal_threshold() {
    let vh = 1000.0;
    assert!(is_revealed(rect(900.0, 500.0), vh));
    assert!(!is_revealed(rect(950.0, 500.0), vh));
    assert!(is_revealed(rect(-100.0, 500.0), vh));
    assert!(!is_revealed(rect(-480.0, 500.0), vh));
    assert!(!is_revealed(rect(0.0, 0.0), vh));
}
