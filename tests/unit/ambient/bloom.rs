use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scheduler(seed: u64) -> BloomScheduler<StdRng> {
    BloomScheduler::new(AmbientConfig::default(), StdRng::seed_from_u64(seed)).unwrap()
}

fn run_until(
    s: &mut BloomScheduler<StdRng>,
    lamps: &mut LampState,
    timers: &mut Timers<AmbientTick>,
    until: u64,
) -> Vec<BloomEvent> {
    let mut out = Vec::new();
    while let Some(f) = timers.pop_due(Millis(until)) {
        if let Some(ev) = s.on_tick(f.payload, f.at, lamps, timers) {
            out.push(ev);
        }
    }
    out
}

#[test]
fn nothing_blooms_before_start() {
    let mut s = scheduler(1);
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    assert!(run_until(&mut s, &mut lamps, &mut timers, 10_000).is_empty());
    assert_eq!(lamps.total(), 0);
}

#[test]
fn ticks_respect_interval_and_params_ranges() {
    let cfg = AmbientConfig::default();
    let mut s = scheduler(7);
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    s.start(&mut timers);

    let events = run_until(&mut s, &mut lamps, &mut timers, 60_000);
    assert!(!events.is_empty());
    let mut prev = 0;
    for ev in &events {
        let gap = ev.at.0 - prev;
        assert!(cfg.interval_ms.contains(gap), "gap {gap}");
        prev = ev.at.0;
        assert!(matches!(ev.blooms.len(), 1 | 2));
        if ev.blooms.len() == 2 {
            assert_ne!(ev.blooms[0].lamp_id, ev.blooms[1].lamp_id);
        }
        for b in &ev.blooms {
            assert!(cfg.amplitude.contains(b.params.amplitude));
            assert!(cfg.duration_ms.contains(b.params.duration_ms));
            assert!(cfg.start_delay_ms.contains(b.params.delay_ms));
        }
    }
    let blooms: usize = events.iter().map(|e| e.blooms.len()).sum();
    assert_eq!(lamps.total(), blooms as u64);
}

#[test]
fn pair_fraction_converges_and_counters_never_decrease() {
    let mut s = scheduler(0x5EED);
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    s.start(&mut timers);

    let mut pairs = 0usize;
    let mut ticks = 0usize;
    let mut last = lamps.clone();
    while ticks < 10_000 {
        let f = timers.pop_due(Millis(u64::MAX)).unwrap();
        let ev = s.on_tick(f.payload, f.at, &mut lamps, &mut timers).unwrap();
        ticks += 1;
        if ev.blooms.len() == 2 {
            pairs += 1;
        }
        for (id, v) in lamps.iter() {
            assert!(v >= last.get(id));
        }
        last = lamps.clone();
    }
    let frac = pairs as f64 / ticks as f64;
    assert!((frac - 0.4).abs() <= 0.02, "pair fraction {frac}");
}

#[test]
fn same_seed_replays_same_sequence() {
    let collect = |seed| {
        let mut s = scheduler(seed);
        let mut lamps = LampState::new(s.lamps());
        let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
        s.start(&mut timers);
        run_until(&mut s, &mut lamps, &mut timers, 20_000)
    };
    assert_eq!(collect(42), collect(42));
}

#[test]
fn cancel_mid_flight_stops_all_mutation() {
    let mut s = scheduler(3);
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    s.start(&mut timers);
    run_until(&mut s, &mut lamps, &mut timers, 5_000);
    assert_eq!(timers.pending(), 1);

    let snapshot = lamps.clone();
    s.cancel(&mut timers);
    assert_eq!(s.state(), SchedulerState::Cancelled);
    assert_eq!(timers.pending(), 0);

    assert!(run_until(&mut s, &mut lamps, &mut timers, 5_000 + 1_200 * 20).is_empty());
    assert_eq!(lamps, snapshot);

    s.start(&mut timers);
    assert_eq!(timers.pending(), 0);
}

#[test]
fn stale_tick_is_refused() {
    let mut s = scheduler(9);
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    s.start(&mut timers);
    let f = timers.pop_due(Millis(u64::MAX)).unwrap();
    assert!(s.on_tick(f.payload, f.at, &mut lamps, &mut timers).is_some());
    // Replaying the same payload must not bloom twice.
    assert!(s.on_tick(f.payload, f.at, &mut lamps, &mut timers).is_none());
}

#[test]
fn single_lamp_catalogue_never_pairs() {
    let cfg = AmbientConfig {
        lamps: vec![Lamp::new("only", 50.0, 50.0)],
        pair_probability: 1.0,
        ..AmbientConfig::default()
    };
    let mut s = BloomScheduler::new(cfg, StdRng::seed_from_u64(1)).unwrap();
    let mut lamps = LampState::new(s.lamps());
    let mut timers: Timers<AmbientTick> = Timers::new(Millis(16));
    s.start(&mut timers);
    for ev in run_until(&mut s, &mut lamps, &mut timers, 10_000) {
        assert_eq!(ev.blooms.len(), 1);
    }
}

#[test]
fn config_validation_rejects_bad_values() {
    let empty = AmbientConfig {
        lamps: vec![],
        ..AmbientConfig::default()
    };
    assert!(empty.validate().is_err());

    let prob = AmbientConfig {
        pair_probability: 1.5,
        ..AmbientConfig::default()
    };
    assert!(prob.validate().is_err());

    let dup = AmbientConfig {
        lamps: vec![Lamp::new("a", 0.0, 0.0), Lamp::new("a", 1.0, 1.0)],
        ..AmbientConfig::default()
    };
    assert!(dup.validate().is_err());

    let inverted = AmbientConfig {
        interval_ms: Span {
            min: 900,
            max: 100,
        },
        ..AmbientConfig::default()
    };
    assert!(inverted.validate().is_err());
}
