use crate::ambient::bloom::AmbientConfig;
use crate::collage::convergence::CollageConfig;
use crate::foundation::error::{MotionError, MotionResult};
use crate::reveal::oneshot::OneShotConfig;
use crate::reveal::rearm::RearmConfig;
use crate::reveal::title::TitleTimelineConfig;
use crate::scroll::progress::SettleConfig;
use crate::scroll::stepper::StepperConfig;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub about: OneShotConfig,
    pub rearm: RearmConfig,
    pub title: TitleTimelineConfig,
    pub features_extra_delay_ms: u64,
    pub blast_extra_delay_ms: u64,
    /// Frames a reveal keeps looking for an unmounted target before giving up.
    pub max_locate_frames: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            about: OneShotConfig::default(),
            rearm: RearmConfig::default(),
            title: TitleTimelineConfig::default(),
            features_extra_delay_ms: 0,
            blast_extra_delay_ms: 150,
            max_locate_frames: 5,
        }
    }
}

/// Every tunable of the page choreography. All fields default, so a partial JSON
/// document only overrides what it names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChoreoConfig {
    /// Media resources the loader waits for.
    pub resources: Vec<String>,
    /// Subset of `resources` already complete at mount (served from cache, no load signal).
    pub cached_resources: Vec<String>,
    pub frame_interval_ms: u64,
    /// Delay after the gate opens before entrance animations start.
    pub has_loaded_delay_ms: u64,
    /// Delay after the gate opens before the settle mapper starts sampling.
    pub scroll_ready_delay_ms: u64,
    pub ambient: AmbientConfig,
    pub settle: SettleConfig,
    pub stepper: StepperConfig,
    pub reveal: RevealConfig,
    pub collage: CollageConfig,
}

impl Default for ChoreoConfig {
    fn default() -> Self {
        Self {
            resources: ["bleed-bg", "bg", "year", "yatra", "torii"]
                .into_iter()
                .map(String::from)
                .collect(),
            cached_resources: Vec::new(),
            frame_interval_ms: 16,
            has_loaded_delay_ms: 260,
            scroll_ready_delay_ms: 1200,
            ambient: AmbientConfig::default(),
            settle: SettleConfig::default(),
            stepper: StepperConfig::default(),
            reveal: RevealConfig::default(),
            collage: CollageConfig::default(),
        }
    }
}

impl ChoreoConfig {
    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> MotionResult<()> {
        let mut keys: Vec<&str> = self.resources.iter().map(String::as_str).collect();
        keys.sort_unstable();
        if keys.windows(2).any(|w| w[0] == w[1]) {
            return Err(MotionError::config("resource keys must be unique"));
        }
        if let Some(key) = self
            .cached_resources
            .iter()
            .find(|k| !self.resources.contains(k))
        {
            return Err(MotionError::config(format!(
                "cached resource '{key}' is not in resources"
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(MotionError::config("frame_interval_ms must be > 0"));
        }
        self.ambient.validate()?;
        self.settle.validate()?;
        self.stepper.validate()?;
        self.reveal.about.validate()?;
        self.reveal.rearm.validate()?;
        self.reveal.title.validate()?;
        self.collage.validate()?;
        Ok(())
    }
}
