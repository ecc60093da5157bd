use super::*;
use proptest::prelude::*;

fn rect_at(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 400.0, top + height)
}

fn run_frames(p: &mut ScrollProgress, timers: &mut Timers<SettleFrame>, until: u64) -> usize {
    let mut frames = 0;
    while let Some(f) = timers.pop_due(Millis(until)) {
        p.on_frame(f.at, timers);
        frames += 1;
    }
    frames
}

#[test]
fn target_maps_element_position() {
    assert_eq!(settle_target(rect_at(0.0, 800.0)), 0.0);
    assert_eq!(settle_target(rect_at(-400.0, 800.0)), 0.5);
    assert_eq!(settle_target(rect_at(-2000.0, 800.0)), 1.0);
    assert_eq!(settle_target(rect_at(300.0, 800.0)), 0.0);
    // Zero-height elements use a 1px denominator.
    assert_eq!(settle_target(rect_at(-0.5, 0.0)), 0.5);
}

#[test]
fn samples_before_enable_are_dropped() {
    let mut p = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    p.sample(Some(rect_at(-400.0, 800.0)), &mut timers);
    assert_eq!(p.target(), 0.0);
    assert_eq!(timers.pending(), 0);
}

#[test]
fn frame_loop_converges_then_parks() {
    let mut p = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    p.enable();
    p.sample(Some(rect_at(-400.0, 800.0)), &mut timers);
    assert!(p.is_settling());
    assert_eq!(p.current(), 0.0);

    let frames = run_frames(&mut p, &mut timers, 60_000);
    assert!(frames > 10);
    assert_eq!(p.current(), 0.5);
    assert!(!p.is_settling());
    assert_eq!(timers.pending(), 0);

    // A new scroll sample resumes the loop.
    p.sample(Some(rect_at(0.0, 800.0)), &mut timers);
    assert!(p.is_settling());
    run_frames(&mut p, &mut timers, 120_000);
    assert_eq!(p.current(), 0.0);
}

#[test]
fn rapid_samples_share_one_pending_frame() {
    let mut p = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    p.enable();
    for top in [-100.0, -200.0, -300.0, -400.0] {
        p.sample(Some(rect_at(top, 800.0)), &mut timers);
    }
    assert_eq!(timers.pending(), 1);
    assert_eq!(p.target(), 0.5);
}

#[test]
fn missing_element_keeps_previous_target() {
    let mut p = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    p.enable();
    p.sample(Some(rect_at(-200.0, 800.0)), &mut timers);
    p.sample(None, &mut timers);
    assert_eq!(p.target(), 0.25);
}

#[test]
fn larger_gaps_converge_faster() {
    let mut a = ScrollProgress::new(SettleConfig::default());
    let mut b = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    for p in [&mut a, &mut b] {
        p.enable();
        p.sample(Some(rect_at(-800.0, 800.0)), &mut timers);
    }
    a.step(16.0);
    b.step(48.0);
    assert!(b.current() > a.current());
}

#[test]
fn cancel_stops_the_loop() {
    let mut p = ScrollProgress::new(SettleConfig::default());
    let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
    p.enable();
    p.sample(Some(rect_at(-400.0, 800.0)), &mut timers);
    run_frames(&mut p, &mut timers, 48);
    let frozen = p.current();
    p.cancel(&mut timers);
    assert_eq!(timers.pending(), 0);
    run_frames(&mut p, &mut timers, 10_000);
    assert_eq!(p.current(), frozen);
    p.sample(Some(rect_at(0.0, 800.0)), &mut timers);
    assert_eq!(timers.pending(), 0);
}

proptest! {
    #[test]
    fn gap_never_grows_and_converges(target in 0.0f64..=1.0, dt in 0.0f64..=50.0) {
        let mut p = ScrollProgress::new(SettleConfig::default());
        let mut timers: Timers<SettleFrame> = Timers::new(Millis(16));
        p.enable();
        p.sample(Some(rect_at(-target * 1000.0, 1000.0)), &mut timers);

        let mut gap = (p.target() - p.current()).abs();
        let mut steps = 0;
        while gap > 1e-4 {
            p.step(dt);
            let next = (p.target() - p.current()).abs();
            prop_assert!(next <= gap);
            prop_assert!((0.0..=1.0).contains(&p.current()));
            gap = next;
            steps += 1;
            prop_assert!(steps <= 2_000, "no convergence after {} steps", steps);
        }
    }
}
