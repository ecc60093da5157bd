use crate::ambient::bloom::AmbientTick;
use crate::ambient::lamps::LampState;
use crate::collage::convergence::ItemTransform;
use crate::reveal::title::TitlePhase;
use crate::scroll::progress::SettleFrame;

/// Sections with visibility-gated reveals.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    About,
    Features,
    Blast,
}

/// Inbound signals from the presentation layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// A tracked resource finished loading or failed.
    ResourceComplete { key: String },
    Scroll,
    Resize,
    /// Ratio reported by an external intersection observer.
    Intersection { section: SectionId, ratio: f64 },
}

/// Everything the presentation layer needs to style the page at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageState {
    /// Virtual time of the snapshot.
    pub at_ms: u64,
    /// Some tracked resource has not reported yet; the loader overlay is shown.
    pub is_loading: bool,
    /// Entrance animations may start (flips once, after the gate opens).
    pub has_loaded: bool,
    /// The settle mapper is sampling scroll (flips once, after the gate opens).
    pub is_scroll_ready: bool,
    /// Bloom counters keyed by lamp id.
    pub lamp_state: LampState,
    /// Smoothed hero scroll progress in `[0, 1]`.
    pub settle_progress: f64,
    /// About section has been seen at least once.
    pub about_entered: bool,
    /// Sticky copy step of the about section, `0` or `1`.
    pub about_step: u8,
    /// Bumped whenever the about copy reveal should replay.
    pub about_reveal_seq: u64,
    pub is_features_visible: bool,
    /// Title phase of the features section.
    pub features_title: TitlePhase,
    pub is_blast_visible: bool,
    /// Title phase of the blast section.
    pub blast_title: TitlePhase,
    /// One transform per collage item, in item order.
    pub collage: Vec<ItemTransform>,
}

/// Work items on the page's timer queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum PageTask {
    HasLoaded,
    ScrollReady,
    /// Coalesced geometry pass for observers, the stepper and the collage.
    Layout,
    Bloom(AmbientTick),
    Settle(SettleFrame),
    Locate(SectionId),
}

impl From<AmbientTick> for PageTask {
    fn from(t: AmbientTick) -> Self {
        Self::Bloom(t)
    }
}

impl From<SettleFrame> for PageTask {
    fn from(f: SettleFrame) -> Self {
        Self::Settle(f)
    }
}
