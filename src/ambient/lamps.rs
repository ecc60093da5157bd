use std::collections::BTreeMap;

/// A glow hotspot over the hero background art, in percent of the stage box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lamp {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Lamp {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }
}

/// The lanterns strung across the hero artwork.
pub fn default_lamps() -> Vec<Lamp> {
    vec![
        Lamp::new("lamp-0", 4.5, 18.2),
        Lamp::new("lamp-1", 16.0, 20.1),
        Lamp::new("lamp-2", 30.2, 19.4),
        Lamp::new("lamp-3", 44.2, 20.0),
        Lamp::new("lamp-4", 58.0, 20.1),
        Lamp::new("lamp-5", 71.6, 20.4),
        Lamp::new("lamp-6", 85.0, 20.0),
        Lamp::new("lamp-7", 96.0, 18.6),
    ]
}

/// Per-lamp bloom sequence counters.
///
/// The presentation layer keys each glow element by `(lamp id, counter)`, so a bump
/// replays the one-shot animation. Counters only ever grow.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct LampState {
    seq: BTreeMap<String, u64>,
}

impl LampState {
    pub fn new(lamps: &[Lamp]) -> Self {
        Self {
            seq: lamps.iter().map(|l| (l.id.clone(), 0)).collect(),
        }
    }

    /// Increment `id`'s counter and return the new value.
    pub fn bump(&mut self, id: &str) -> u64 {
        let v = self.seq.entry(id.to_owned()).or_insert(0);
        *v = v.saturating_add(1);
        *v
    }

    pub fn get(&self, id: &str) -> u64 {
        self.seq.get(id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.seq.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> u64 {
        self.seq.values().sum()
    }
}
