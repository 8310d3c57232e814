// Host-side tests for the frame ticker.

use card_core::{EffectStatus, Frame, Ticker};

#[derive(Default)]
struct Log {
    calls: Vec<&'static str>,
    frames: Vec<Frame>,
}

fn countdown(name: &'static str, mut left: u32) -> impl FnMut(&mut Log, &Frame) -> EffectStatus {
    move |log: &mut Log, _frame: &Frame| {
        log.calls.push(name);
        left = left.saturating_sub(1);
        if left == 0 {
            EffectStatus::Done
        } else {
            EffectStatus::Continue
        }
    }
}

#[test]
fn new_ticker_is_idle() {
    let mut t: Ticker<Log> = Ticker::new();
    let mut log = Log::default();
    assert!(t.is_idle());
    assert!(!t.tick(&mut log, 0.0));
}

#[test]
fn done_effects_are_dropped() {
    let mut t: Ticker<Log> = Ticker::new();
    let mut log = Log::default();
    t.push(countdown("a", 2));
    t.push(countdown("b", 1));
    assert_eq!(t.len(), 2);

    assert!(t.tick(&mut log, 0.0));
    assert_eq!(t.len(), 1);
    assert!(!t.tick(&mut log, 16.0));
    assert!(t.is_idle());
    assert_eq!(log.calls, ["a", "b", "a"]);
}

#[test]
fn keyed_effects_replace_each_other() {
    let mut t: Ticker<Log> = Ticker::new();
    let mut log = Log::default();
    t.replace("kick-yes", countdown("old", 10));
    t.replace("kick-yes", countdown("new", 10));
    t.push(countdown("anon", 10));
    assert_eq!(t.len(), 2);
    assert!(t.contains("kick-yes"));

    t.tick(&mut log, 0.0);
    assert_eq!(log.calls, ["new", "anon"]);

    assert!(t.remove("kick-yes"));
    assert!(!t.remove("kick-yes"));
    assert_eq!(t.len(), 1);
}

#[test]
fn frames_carry_time_and_index() {
    let mut t: Ticker<Log> = Ticker::new();
    let mut log = Log::default();
    t.push(|log: &mut Log, frame: &Frame| {
        log.frames.push(*frame);
        EffectStatus::Continue
    });
    t.tick(&mut log, 100.0);
    t.tick(&mut log, 116.0);
    t.tick(&mut log, 110.0);
    assert_eq!(log.frames[0].dt_ms, 0.0);
    assert_eq!(log.frames[0].index, 0);
    assert_eq!(log.frames[1].dt_ms, 16.0);
    assert_eq!(log.frames[1].now_ms, 116.0);
    assert_eq!(log.frames[2].dt_ms, 0.0);
    assert_eq!(log.frames[2].index, 2);
}

#[test]
fn clear_drops_everything() {
    let mut t: Ticker<Log> = Ticker::new();
    let mut log = Log::default();
    t.push(countdown("a", 5));
    t.replace("progress", countdown("b", 5));
    t.clear();
    assert!(t.is_idle());
    assert!(!t.tick(&mut log, 0.0));
    assert!(log.calls.is_empty());
}
