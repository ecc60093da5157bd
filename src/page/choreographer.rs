use rand::Rng;

use crate::ambient::bloom::{BloomEvent, BloomScheduler};
use crate::ambient::lamps::LampState;
use crate::collage::convergence::ConvergenceAnimator;
use crate::config::ChoreoConfig;
use crate::foundation::core::{ElementId, Millis};
use crate::foundation::error::MotionResult;
use crate::gate::load_gate::{GateTransition, LoadGate};
use crate::geometry::GeometryProvider;
use crate::page::state::{PageEvent, PageState, PageTask, SectionId};
use crate::reveal::locate::{LocateOutcome, TargetLocator};
use crate::reveal::oneshot::OneShotReveal;
use crate::reveal::rearm::RearmableReveal;
use crate::reveal::title::TitleTimeline;
use crate::runtime::timers::{Fired, Timers};
use crate::scroll::progress::ScrollProgress;
use crate::scroll::stepper::HysteresisStepper;

/// One-shot about section: latch, sticky two-step swap, replayable copy reveal.
struct AboutSection {
    reveal: OneShotReveal,
    stepper: HysteresisStepper,
    locator: TargetLocator,
}

impl AboutSection {
    fn replay<G: GeometryProvider>(&mut self, geometry: &G, timers: &mut Timers<PageTask>) {
        let found = geometry.rect(ElementId::AboutCopy).is_some();
        let retry = PageTask::Locate(SectionId::About);
        if self.locator.begin(found, retry, timers) == LocateOutcome::Found {
            self.reveal.replay();
        }
    }

    fn on_locate_frame<G: GeometryProvider>(&mut self, geometry: &G, timers: &mut Timers<PageTask>) {
        let found = geometry.rect(ElementId::AboutCopy).is_some();
        let retry = PageTask::Locate(SectionId::About);
        if self.locator.on_frame(found, retry, timers) == Some(LocateOutcome::Found) {
            self.reveal.replay();
        }
    }
}

/// Re-armable section with a glitch/settle title.
struct TitledSection {
    id: SectionId,
    section: ElementId,
    title_el: ElementId,
    reveal: RearmableReveal,
    title: TitleTimeline,
    locator: TargetLocator,
}

impl TitledSection {
    fn on_flip<G: GeometryProvider>(
        &mut self,
        visible: bool,
        geometry: &G,
        timers: &mut Timers<PageTask>,
    ) {
        tracing::debug!(section = ?self.id, visible, "section visibility flipped");
        if !visible {
            self.locator.cancel(timers);
            self.title.reset();
            return;
        }
        let found = geometry.rect(self.title_el).is_some();
        if self.locator.begin(found, PageTask::Locate(self.id), timers) == LocateOutcome::Found {
            self.title.restart(timers.now());
        }
    }

    fn on_locate_frame<G: GeometryProvider>(&mut self, geometry: &G, timers: &mut Timers<PageTask>) {
        if !self.reveal.is_visible() {
            return;
        }
        let found = geometry.rect(self.title_el).is_some();
        let outcome = self
            .locator
            .on_frame(found, PageTask::Locate(self.id), timers);
        if outcome == Some(LocateOutcome::Found) {
            self.title.restart(timers.now());
        }
    }

    fn teardown(&mut self, timers: &mut Timers<PageTask>) {
        self.locator.cancel(timers);
        self.reveal.disconnect();
    }
}

/// Top-level dispatcher that drives every animation component of the landing page.
///
/// All mutation happens inside [`Choreographer::dispatch`] and [`Choreographer::advance`];
/// there is no background work. After [`Choreographer::teardown`] both become no-ops.
pub struct Choreographer<G, R> {
    cfg: ChoreoConfig,
    geometry: G,
    timers: Timers<PageTask>,
    gate: LoadGate,
    /// Gate-open work (blooms, loader delays) has been scheduled.
    gate_opened: bool,
    lamps: LampState,
    bloom: BloomScheduler<R>,
    blooms: Vec<BloomEvent>,
    has_loaded: bool,
    scroll_ready: bool,
    settle: ScrollProgress,
    about: AboutSection,
    features: TitledSection,
    blast: TitledSection,
    collage: ConvergenceAnimator,
    torn_down: bool,
}

impl<G, R> Choreographer<G, R>
where
    G: GeometryProvider,
    R: Rng,
{
    /// Validate `cfg` and build every component. Nothing is scheduled until
    /// [`Choreographer::mount`] or the first event.
    pub fn new(cfg: ChoreoConfig, geometry: G, rng: R) -> MotionResult<Self> {
        cfg.validate()?;
        let reveal = &cfg.reveal;
        let titled = |id, section, title_el, extra_ms| -> MotionResult<TitledSection> {
            Ok(TitledSection {
                id,
                section,
                title_el,
                reveal: RearmableReveal::new(&reveal.rearm)?,
                title: TitleTimeline::new(reveal.title.clone(), Millis(extra_ms)),
                locator: TargetLocator::new(reveal.max_locate_frames),
            })
        };
        let features = titled(
            SectionId::Features,
            ElementId::FeaturesSection,
            ElementId::FeaturesTitle,
            reveal.features_extra_delay_ms,
        )?;
        let blast = titled(
            SectionId::Blast,
            ElementId::BlastSection,
            ElementId::BlastTitle,
            reveal.blast_extra_delay_ms,
        )?;
        let about = AboutSection {
            reveal: OneShotReveal::new(&reveal.about)?,
            stepper: HysteresisStepper::new(),
            locator: TargetLocator::new(reveal.max_locate_frames),
        };

        let bloom = BloomScheduler::new(cfg.ambient.clone(), rng)?;
        Ok(Self {
            timers: Timers::new(Millis(cfg.frame_interval_ms)),
            gate: LoadGate::new_with_completed(
                cfg.resources.iter().cloned(),
                cfg.cached_resources.iter().cloned(),
            )?,
            gate_opened: false,
            lamps: LampState::new(bloom.lamps()),
            bloom,
            blooms: Vec::new(),
            has_loaded: false,
            scroll_ready: false,
            settle: ScrollProgress::new(cfg.settle.clone()),
            about,
            features,
            blast,
            collage: ConvergenceAnimator::new(cfg.collage.clone())?,
            torn_down: false,
            geometry,
            cfg,
        })
    }

    pub fn config(&self) -> &ChoreoConfig {
        &self.cfg
    }

    /// Geometry the page reads from.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable access for hosts that own their geometry; follow changes with a
    /// `Scroll` or `Resize` event.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Initial measurement right after mount, before any scroll event.
    ///
    /// A gate with nothing outstanding (no resources, or all cached) opens here.
    pub fn mount(&mut self) {
        if self.torn_down {
            return;
        }
        if self.gate.is_open() {
            self.on_gate_open();
        }
        self.layout_pass();
    }

    /// Apply one inbound signal.
    ///
    /// Scroll and resize resample the settle target immediately and queue a single
    /// layout frame. Fails only for a resource key the gate does not track.
    #[tracing::instrument(skip(self), fields(at = self.timers.now().0))]
    pub fn dispatch(&mut self, event: PageEvent) -> MotionResult<()> {
        if self.torn_down {
            return Ok(());
        }
        match event {
            PageEvent::ResourceComplete { key } => {
                if self.gate.mark_complete(&key)? == GateTransition::Opened {
                    self.on_gate_open();
                }
            }
            PageEvent::Scroll | PageEvent::Resize => {
                let hero = self.geometry.rect(ElementId::Hero);
                self.settle.sample(hero, &mut self.timers);
                self.timers.request_frame(PageTask::Layout);
            }
            PageEvent::Intersection { section, ratio } => self.on_intersection(section, ratio),
        }
        Ok(())
    }

    /// Run the virtual clock forward, firing every timer that comes due.
    pub fn advance(&mut self, by: Millis) {
        if self.torn_down {
            return;
        }
        let until = self.timers.now().saturating_add(by);
        while let Some(fired) = self.timers.pop_due(until) {
            self.on_timer(fired);
        }
    }

    /// Cancel every timer, frame loop and observer. Nothing mutates afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.bloom.cancel(&mut self.timers);
        self.settle.cancel(&mut self.timers);
        self.about.locator.cancel(&mut self.timers);
        self.about.reveal.disconnect();
        self.features.teardown(&mut self.timers);
        self.blast.teardown(&mut self.timers);
        self.timers.cancel_all();
        self.torn_down = true;
        tracing::debug!(at = self.timers.now().0, "choreographer torn down");
    }

    /// Bloom events since the last call.
    pub fn take_blooms(&mut self) -> Vec<BloomEvent> {
        std::mem::take(&mut self.blooms)
    }

    /// Published state at the current virtual time.
    pub fn snapshot(&self) -> PageState {
        let now = self.timers.now();
        PageState {
            at_ms: now.0,
            is_loading: self.gate.is_loading(),
            has_loaded: self.has_loaded,
            is_scroll_ready: self.scroll_ready,
            lamp_state: self.lamps.clone(),
            settle_progress: self.settle.current(),
            about_entered: self.about.reveal.has_entered_once(),
            about_step: self.about.stepper.step(),
            about_reveal_seq: self.about.reveal.reveal_seq(),
            is_features_visible: self.features.reveal.is_visible(),
            features_title: self.features.title.phase(now),
            is_blast_visible: self.blast.reveal.is_visible(),
            blast_title: self.blast.title.phase(now),
            collage: self.collage.transforms().to_vec(),
        }
    }

    fn on_gate_open(&mut self) {
        if self.gate_opened {
            return;
        }
        self.gate_opened = true;
        self.bloom.start(&mut self.timers);
        self.timers
            .set_timeout(Millis(self.cfg.has_loaded_delay_ms), PageTask::HasLoaded);
        self.timers
            .set_timeout(Millis(self.cfg.scroll_ready_delay_ms), PageTask::ScrollReady);
    }

    fn on_timer(&mut self, fired: Fired<PageTask>) {
        match fired.payload {
            PageTask::HasLoaded => self.has_loaded = true,
            PageTask::ScrollReady => {
                self.scroll_ready = true;
                self.settle.enable();
                let hero = self.geometry.rect(ElementId::Hero);
                self.settle.sample(hero, &mut self.timers);
            }
            PageTask::Layout => self.layout_pass(),
            PageTask::Bloom(tick) => {
                if let Some(ev) =
                    self.bloom
                        .on_tick(tick, fired.at, &mut self.lamps, &mut self.timers)
                {
                    self.blooms.push(ev);
                }
            }
            PageTask::Settle(_) => self.settle.on_frame(fired.at, &mut self.timers),
            PageTask::Locate(SectionId::About) => {
                self.about.on_locate_frame(&self.geometry, &mut self.timers)
            }
            PageTask::Locate(SectionId::Features) => {
                self.features.on_locate_frame(&self.geometry, &mut self.timers)
            }
            PageTask::Locate(SectionId::Blast) => {
                self.blast.on_locate_frame(&self.geometry, &mut self.timers)
            }
        }
    }

    fn layout_pass(&mut self) {
        let viewport = self.geometry.viewport();

        let about_rect = self.geometry.rect(ElementId::AboutSection);
        if self.about.reveal.observe(about_rect, viewport) {
            self.on_about_entered();
        } else if self
            .about
            .stepper
            .sample(&self.cfg.stepper, about_rect, viewport.height)
            .is_some()
        {
            self.about.replay(&self.geometry, &mut self.timers);
        }

        for section in [&mut self.features, &mut self.blast] {
            let rect = self.geometry.rect(section.section);
            if let Some(visible) = section.reveal.observe(rect, viewport) {
                section.on_flip(visible, &self.geometry, &mut self.timers);
            }
        }

        self.collage.sample(
            self.geometry.rect(ElementId::CollageSection),
            self.geometry.rect(ElementId::CollageContainer),
            viewport.height,
        );
    }

    fn on_about_entered(&mut self) {
        self.about.stepper.arm();
        let viewport = self.geometry.viewport();
        self.about.stepper.sample(
            &self.cfg.stepper,
            self.geometry.rect(ElementId::AboutSection),
            viewport.height,
        );
        self.about.replay(&self.geometry, &mut self.timers);
    }

    fn on_intersection(&mut self, section: SectionId, ratio: f64) {
        match section {
            SectionId::About => {
                if self.about.reveal.on_ratio(ratio) {
                    self.on_about_entered();
                }
            }
            SectionId::Features => {
                if let Some(visible) = self.features.reveal.on_ratio(ratio) {
                    self.features
                        .on_flip(visible, &self.geometry, &mut self.timers);
                }
            }
            SectionId::Blast => {
                if let Some(visible) = self.blast.reveal.on_ratio(ratio) {
                    self.blast.on_flip(visible, &self.geometry, &mut self.timers);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/choreographer.rs"]
mod tests;
