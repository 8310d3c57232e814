// Host-side tests for the chase game, the No confirm loop and the runaway button.

mod common;

use card_core::chase::*;
use card_core::config::NoConfirmConfig;
use common::{approx, sample};
use glam::Vec2;

fn geometry() -> ZoneGeometry {
    ZoneGeometry {
        zone: Rect::new(0.0, 0.0, 600.0, 400.0),
        yes: Some(Rect::new(100.0, 150.0, 120.0, 44.0)),
        no: Some(Rect::new(400.0, 250.0, 120.0, 44.0)),
    }
}

fn game(with_no: bool, reduced_motion: bool) -> ChaseGame {
    ChaseGame::new(&sample().chase, ChaseHost::Chapter, with_no, true, reduced_motion, 7)
}

#[test]
fn starts_with_host_hint() {
    let g = game(true, false);
    assert!(g.enabled());
    assert_eq!(g.taunt(), "(Tip: move your cursor near the buttons.)");
    let page = ChaseGame::new(&sample().chase, ChaseHost::Page, true, true, false, 7);
    assert_eq!(page.taunt(), "(Move near the buttons…)");
}

#[test]
fn far_pointer_does_nothing() {
    let mut g = game(true, false);
    let geo = geometry();
    assert!(g.pointer(Vec2::new(0.0, 0.0), &geo).is_empty());
    assert_eq!(g.state(Side::Yes).unwrap().dodges, 0);
}

#[test]
fn yes_dodges_then_gives_up() {
    let mut g = game(true, false);
    let geo = geometry();
    let near_yes = geo.yes.unwrap().center();

    for n in 1..=2 {
        let dodges = g.pointer(near_yes, &geo);
        assert_eq!(dodges.len(), 1);
        let d = dodges[0];
        assert_eq!(d.side, Side::Yes);
        assert!(!d.gave_up);
        assert_ne!(d.kick, Vec2::ZERO);
        assert!(d.position.x >= 18.0 && d.position.x <= 600.0 - 120.0 - 18.0);
        assert!(d.position.y >= 18.0 && d.position.y <= 400.0 - 44.0 - 18.0);
        assert_eq!(g.state(Side::Yes).unwrap().dodges, n);
    }

    let last = g.pointer(near_yes, &geo);
    assert_eq!(last.len(), 1);
    assert!(last[0].gave_up);
    assert_eq!(last[0].kick, Vec2::ZERO);
    assert_eq!(g.taunt(), "Okay okay — click me 😌");
    assert!(g.state(Side::Yes).unwrap().given_up);

    assert!(g.pointer(near_yes, &geo).is_empty());
    assert_eq!(g.state(Side::Yes).unwrap().dodges, 3);
}

#[test]
fn taunts_cycle_from_second_line() {
    let mut g = game(true, false);
    let geo = geometry();
    let near_yes = geo.yes.unwrap().center();
    g.pointer(near_yes, &geo);
    assert_eq!(g.taunt(), "Almost!");
    g.pointer(near_yes, &geo);
    assert_eq!(g.taunt(), "Too slow!");
}

#[test]
fn pointer_near_both_moves_both() {
    let mut g = game(true, false);
    let geo = ZoneGeometry {
        zone: Rect::new(0.0, 0.0, 600.0, 400.0),
        yes: Some(Rect::new(100.0, 100.0, 100.0, 40.0)),
        no: Some(Rect::new(180.0, 100.0, 100.0, 40.0)),
    };
    let between = Vec2::new(190.0, 120.0);
    let dodges = g.pointer(between, &geo);
    assert_eq!(dodges.len(), 2);
    assert_eq!(dodges[0].side, Side::Yes);
    assert_eq!(dodges[1].side, Side::No);
}

#[test]
fn clicks_taunt_until_given_up() {
    let mut g = game(true, false);
    assert_eq!(g.click(Side::Yes), ClickOutcome::Taunt);
    assert_eq!(g.taunt(), "Nice try 😌");
    assert_eq!(g.click(Side::No), ClickOutcome::Taunt);
    assert!(g.taunt().contains("serious link"));

    let geo = geometry();
    let near_no = geo.no.unwrap().center();
    g.pointer(near_no, &geo);
    g.pointer(near_no, &geo);
    assert!(g.state(Side::No).unwrap().given_up);
    assert_eq!(g.click(Side::No), ClickOutcome::Proceed);
}

#[test]
fn no_click_without_serious_links() {
    let mut g = ChaseGame::new(&sample().chase, ChaseHost::Page, true, false, false, 1);
    assert_eq!(g.click(Side::No), ClickOutcome::Taunt);
    assert_eq!(g.taunt(), "Not yet 😅");
}

#[test]
fn zero_dodges_are_clickable_immediately() {
    let mut cfg = sample().chase;
    cfg.yes_dodges = 0;
    let mut g = ChaseGame::new(&cfg, ChaseHost::Chapter, true, true, false, 3);
    assert!(g.state(Side::Yes).unwrap().given_up);
    assert_eq!(g.click(Side::Yes), ClickOutcome::Proceed);
    let geo = geometry();
    assert!(g.pointer(geo.yes.unwrap().center(), &geo).is_empty());
}

#[test]
fn missing_no_button() {
    let mut g = game(false, false);
    assert!(g.state(Side::No).is_none());
    let geo = geometry();
    assert!(g.pointer(geo.no.unwrap().center(), &geo).is_empty());
}

#[test]
fn reduced_motion_disables_chase() {
    let mut g = game(true, true);
    assert!(!g.enabled());
    assert_eq!(g.taunt(), REDUCED_MOTION_TAUNT);
    let geo = geometry();
    assert!(g.pointer(geo.yes.unwrap().center(), &geo).is_empty());
    assert_eq!(g.click(Side::Yes), ClickOutcome::Proceed);
    assert_eq!(g.click(Side::No), ClickOutcome::Proceed);
}

#[test]
fn taunt_file_override_until_used() {
    let mut g = game(true, false);
    assert!(g.override_taunts(None, vec!["one".into(), "two".into()]));
    assert!(!g.override_taunts(None, Vec::new()));
    assert!(g.override_taunts(Some(Side::No), vec!["no-a".into(), "no-b".into()]));

    let geo = geometry();
    g.pointer(geo.no.unwrap().center(), &geo);
    assert_eq!(g.taunt(), "no-b");
    g.pointer(geo.yes.unwrap().center(), &geo);
    assert_eq!(g.taunt(), "two");

    assert!(!g.override_taunts(None, vec!["late".into()]));
    assert!(!g.override_taunts(Some(Side::Yes), vec!["late".into()]));
}

#[test]
fn kick_decays_to_zero() {
    let kick = Kick {
        vector: Vec2::new(100.0, -40.0),
        started_ms: 1000.0,
    };
    assert_eq!(kick.offset_at(1000.0), Vec2::new(100.0, -40.0));
    let half = kick.offset_at(1070.0);
    assert!(approx(half.x, 50.0) && approx(half.y, -20.0));
    assert!(!kick.finished(1139.0));
    assert!(kick.finished(1140.0));
    assert_eq!(kick.offset_at(2000.0), Vec2::ZERO);
    assert_eq!(kick_offset(Vec2::ONE, -10.0), Vec2::ONE);
}

#[test]
fn confirm_loop_grows_yes() {
    let cfg = sample();
    let q = cfg.pages.question.as_ref().unwrap();
    let mut confirm = ConfirmLoop::new(&q.no_confirm);
    assert!(approx(confirm.yes_scale(), 1.0));

    match confirm.on_no() {
        ConfirmStep::Prompt {
            text,
            yes_scale,
            no_scale,
            yes_label,
            no_label,
        } => {
            assert_eq!(text, "Are you sure?");
            assert!(approx(yes_scale, 1.18));
            assert!(approx(no_scale, 0.92));
            assert_eq!(yes_label.as_deref(), Some("Fine, yes"));
            assert_eq!(no_label.as_deref(), Some("Still no"));
        }
        other => panic!("unexpected step {other:?}"),
    }
    match confirm.on_no() {
        ConfirmStep::Prompt { text, yes_scale, no_scale, .. } => {
            assert_eq!(text, "Really sure?");
            assert!(approx(yes_scale, 1.36));
            assert!(approx(no_scale, 0.84));
        }
        other => panic!("unexpected step {other:?}"),
    }
    assert!(approx(confirm.yes_scale(), 1.36));
    assert_eq!(
        confirm.on_no(),
        ConfirmStep::Leave {
            taunt: "Okay 💛".into(),
            delay_ms: 450
        }
    );
}

#[test]
fn confirm_loop_without_prompts_proceeds() {
    let mut confirm = ConfirmLoop::new(&NoConfirmConfig::default());
    assert_eq!(confirm.on_no(), ConfirmStep::Proceed);
    assert!(confirm.override_prompts(vec!["Sure?".into()]));
    assert!(matches!(confirm.on_no(), ConfirmStep::Prompt { .. }));
    assert!(!confirm.override_prompts(vec!["Late".into()]));
}

#[test]
fn confirm_scales_are_bounded() {
    let cfg = NoConfirmConfig {
        prompts: (0..20).map(|i| format!("p{i}")).collect(),
        yes_scale_step: 1.0,
        no_scale_step: 0.5,
        ..Default::default()
    };
    let mut confirm = ConfirmLoop::new(&cfg);
    for _ in 0..5 {
        confirm.on_no();
    }
    match confirm.on_no() {
        ConfirmStep::Prompt { yes_scale, no_scale, .. } => {
            assert!(approx(yes_scale, 3.0));
            assert!(approx(no_scale, 0.6));
        }
        other => panic!("unexpected step {other:?}"),
    }
}

#[test]
fn pop_sequence_settles_on_base() {
    let seq = pop_sequence(1.36);
    assert_eq!(seq[0].0, 0);
    assert!(approx(seq[0].1, 1.48));
    assert_eq!(seq[1].0, 140);
    assert!(approx(seq[1].1, 1.32));
    assert_eq!(seq[2].0, 280);
    assert!(approx(seq[2].1, 1.36));
}

#[test]
fn runaway_stops_after_max() {
    let cfg = sample();
    let mut r = Runaway::new(&cfg.runaway_no, 11);
    for _ in 0..2 {
        let jump = r.dodge(400.0).unwrap();
        assert!(jump.offset.x.abs() <= 100.0);
        assert!(jump.offset.y >= -60.0 && jump.offset.y <= 180.0);
        assert_eq!(jump.scroll_by, 40.0);
    }
    assert_eq!(r.dodges(), 2);
    assert!(r.dodge(400.0).is_none());
    assert_eq!(r.dodges(), 2);
}

#[test]
fn runaway_can_keep_going() {
    let mut cfg = sample().runaway_no;
    cfg.stop_after_max_dodges = false;
    let mut r = Runaway::new(&cfg, 11);
    for _ in 0..10 {
        let jump = r.dodge(2000.0).unwrap();
        assert!(jump.offset.x.abs() <= 220.0);
    }
    assert_eq!(r.dodges(), 10);
}
