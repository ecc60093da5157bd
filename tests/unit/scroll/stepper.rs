use super::*;

fn section(top: f64, height: f64) -> Rect {
    Rect::new(0.0, top, 1200.0, top + height)
}

#[test]
fn hysteresis_sequence_holds_between_thresholds() {
    let th = StepThresholds {
        enter_at: 300.0,
        exit_at: 165.0,
    };
    let mut s = HysteresisStepper::new();
    s.arm();
    let steps: Vec<u8> = [0.0, 200.0, 300.0, 310.0, 200.0, 165.0, 160.0]
        .into_iter()
        .map(|scrolled| {
            s.apply(scrolled, th);
            s.step()
        })
        .collect();
    assert_eq!(steps, vec![0, 0, 1, 1, 1, 1, 0]);
}

#[test]
fn unarmed_stepper_never_advances() {
    let th = StepThresholds {
        enter_at: 100.0,
        exit_at: 55.0,
    };
    let mut s = HysteresisStepper::new();
    assert_eq!(s.apply(5_000.0, th), None);
    assert_eq!(s.step(), 0);
    s.arm();
    assert_eq!(s.apply(5_000.0, th), Some(1));
}

#[test]
fn thresholds_follow_viewport_and_extent() {
    let cfg = StepperConfig::default();

    // Small viewport: the 180px floor wins.
    let th = StepThresholds::for_section(&cfg, 2_000.0, 600.0).unwrap();
    assert_eq!(th.enter_at, 180.0);
    assert!((th.exit_at - 99.0).abs() < 1e-9);

    // Tall viewport: 18% of it wins.
    let th = StepThresholds::for_section(&cfg, 2_000.0, 1_500.0).unwrap();
    assert!((th.enter_at - 270.0).abs() < 1e-9);

    // Short extent caps enter_at.
    let th = StepThresholds::for_section(&cfg, 120.0, 800.0).unwrap();
    assert_eq!(th.enter_at, 120.0);

    assert!(StepThresholds::for_section(&cfg, 0.0, 800.0).is_none());
    assert!(StepThresholds::for_section(&cfg, -50.0, 800.0).is_none());
}

#[test]
fn measure_clamps_scrolled_depth() {
    let m = SectionScroll::measure(section(100.0, 1_800.0), 800.0);
    assert_eq!(m.total, 1_000.0);
    assert_eq!(m.scrolled, 0.0);

    let m = SectionScroll::measure(section(-400.0, 1_800.0), 800.0);
    assert_eq!(m.scrolled, 400.0);

    let m = SectionScroll::measure(section(-4_000.0, 1_800.0), 800.0);
    assert_eq!(m.scrolled, 1_000.0);
}

#[test]
fn sample_ignores_degenerate_sections() {
    let cfg = StepperConfig::default();
    let mut s = HysteresisStepper::new();
    s.arm();
    assert_eq!(s.sample(&cfg, None, 800.0), None);
    // Section no taller than the viewport: no transition however far it scrolls.
    assert_eq!(s.sample(&cfg, Some(section(-900.0, 800.0)), 800.0), None);
    assert_eq!(s.step(), 0);

    assert_eq!(s.sample(&cfg, Some(section(-200.0, 1_800.0)), 800.0), Some(1));
    assert_eq!(s.sample(&cfg, Some(section(-120.0, 1_800.0)), 800.0), None);
    assert_eq!(s.sample(&cfg, Some(section(-50.0, 1_800.0)), 800.0), Some(0));
}
