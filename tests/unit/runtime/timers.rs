use super::*;

fn drain(t: &mut Timers<&'static str>, until: u64) -> Vec<(u64, &'static str)> {
    let mut out = Vec::new();
    while let Some(f) = t.pop_due(Millis(until)) {
        out.push((f.at.0, f.payload));
    }
    out
}

#[test]
fn timeouts_fire_in_due_order_then_fifo() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    t.set_timeout(Millis(50), "b");
    t.set_timeout(Millis(10), "a");
    t.set_timeout(Millis(50), "c");
    assert_eq!(drain(&mut t, 100), vec![(10, "a"), (50, "b"), (50, "c")]);
    assert_eq!(t.now(), Millis(100));
    assert_eq!(t.pending(), 0);
}

#[test]
fn cancelled_timer_never_fires() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    let id = t.set_timeout(Millis(10), "x");
    assert!(t.cancel(id));
    assert!(!t.cancel(id));
    assert!(drain(&mut t, 1_000).is_empty());
}

#[test]
fn frame_requests_coalesce_until_fired() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    let a = t.request_frame("settle");
    let b = t.request_frame("settle");
    assert_eq!(a, b);
    assert_eq!(t.pending(), 1);

    assert_eq!(drain(&mut t, 16), vec![(16, "settle")]);
    let c = t.request_frame("settle");
    assert_ne!(a, c);
    assert_eq!(drain(&mut t, 40), vec![(32, "settle")]);
}

#[test]
fn frames_land_on_next_boundary() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    assert!(t.pop_due(Millis(20)).is_none());
    t.request_frame("f");
    assert_eq!(drain(&mut t, 100), vec![(32, "f")]);
}

#[test]
fn cancelling_a_frame_allows_a_fresh_request() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    let a = t.request_frame("f");
    assert!(t.cancel(a));
    let b = t.request_frame("f");
    assert_ne!(a, b);
    assert_eq!(drain(&mut t, 16).len(), 1);
}

#[test]
fn cancel_all_clears_everything() {
    let mut t: Timers<&'static str> = Timers::new(Millis(16));
    t.set_timeout(Millis(5), "a");
    t.request_frame("f");
    t.cancel_all();
    assert_eq!(t.pending(), 0);
    assert!(drain(&mut t, 1_000).is_empty());
}
