use super::*;
use proptest::prelude::*;

const KEYS: [&str; 5] = ["bleed-bg", "bg", "year", "yatra", "torii"];

#[test]
fn opens_after_last_distinct_key() {
    let mut gate = LoadGate::new(KEYS);
    assert!(gate.is_loading());
    for key in &KEYS[..4] {
        assert_eq!(gate.mark_complete(key).unwrap(), GateTransition::Progress);
    }
    assert_eq!(gate.mark_complete("bg").unwrap(), GateTransition::Duplicate);
    assert!(gate.is_loading());
    assert_eq!(gate.outstanding().collect::<Vec<_>>(), vec!["torii"]);
    assert_eq!(gate.mark_complete("torii").unwrap(), GateTransition::Opened);
    assert!(!gate.is_loading());
    assert_eq!(gate.mark_complete("torii").unwrap(), GateTransition::Duplicate);
}

#[test]
fn unknown_key_is_rejected_and_not_counted() {
    let mut gate = LoadGate::new(["a"]);
    assert!(gate.mark_complete("b").is_err());
    assert_eq!(gate.completed(), 0);
    assert!(gate.is_loading());
}

#[test]
fn cached_resources_count_at_registration() {
    let gate = LoadGate::new_with_completed(["a", "b"], ["a"]).unwrap();
    assert_eq!(gate.completed(), 1);
    let gate = LoadGate::new_with_completed(["a", "b"], ["b", "a"]).unwrap();
    assert!(gate.is_open());
}

#[test]
fn empty_gate_is_open() {
    let gate = LoadGate::new(Vec::<String>::new());
    assert!(!gate.is_loading());
}

proptest! {
    #[test]
    fn loading_clears_iff_every_key_marked(calls in prop::collection::vec(0usize..KEYS.len(), 0..40)) {
        let mut gate = LoadGate::new(KEYS);
        let mut seen = std::collections::BTreeSet::new();
        for i in calls {
            gate.mark_complete(KEYS[i]).unwrap();
            seen.insert(i);
            prop_assert_eq!(gate.is_loading(), seen.len() < KEYS.len());
        }
        prop_assert_eq!(gate.completed(), seen.len());
    }
}
