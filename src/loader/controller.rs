use crate::foundation::core::{Millis, Progress};
use crate::foundation::error::FolioResult;
use crate::loader::config::LoaderConfig;
use crate::loader::environment::{Environment, FontsSignal};
use crate::loader::initializer::{InitContext, InitOutcome, PostLoadInitializer, run_contained};
use crate::loader::readiness::ReadinessSet;
use crate::runtime::timers::{TimerId, TimerQueue};
use crate::surface::{DisplaySurface, Target};

/// Lifecycle phase of a [`LoadingController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Stepping through the progress steps while polling dependencies.
    Loading,
    /// Completion shown; overlay about to be (or already) hidden.
    Finishing,
    /// Overlay detached. Terminal.
    Done,
}

/// A phase transition and the virtual instant it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseChange {
    /// When the phase was entered.
    pub at: Millis,
    /// Entered phase.
    pub phase: Phase,
}

/// Summary of a controller run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct LoadReport {
    /// Phase transitions in order, starting with `Loading` at zero.
    pub phases: Vec<PhaseChange>,
    /// `true` when the ceiling timer forced finishing.
    pub forced_by_ceiling: bool,
    /// Number of steps displayed before finishing.
    pub steps_shown: usize,
    /// Final readiness flags.
    pub readiness: ReadinessSet,
    /// Post-load initializer outcomes, in invocation order.
    pub initializers: Vec<InitOutcome>,
    /// Last displayed percentage.
    pub final_progress: Progress,
}

impl LoadReport {
    /// When `phase` was entered, if it was.
    pub fn entered(&self, phase: Phase) -> Option<Millis> {
        self.phases.iter().find(|c| c.phase == phase).map(|c| c.at)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoaderEvent {
    StepTick,
    Poll,
    FontsResolved,
    FontsFallback,
    Ceiling,
    CeilingReached,
    Settle,
    Detach,
}

/// Staged loading screen state machine.
///
/// Construction starts stepping and polling at virtual time zero. Drive it with
/// [`advance_to`](Self::advance_to), [`advance_by`](Self::advance_by) or
/// [`run_to_completion`](Self::run_to_completion). Finishing begins once every step was shown
/// and every dependency is ready, or when the ceiling timer fires, whichever comes first.
pub struct LoadingController<S, E> {
    config: LoaderConfig,
    surface: S,
    env: E,
    timers: TimerQueue<LoaderEvent>,
    initializers: Vec<Box<dyn PostLoadInitializer>>,
    outcomes: Vec<InitOutcome>,

    phase: Phase,
    phases: Vec<PhaseChange>,
    readiness: ReadinessSet,
    next_step: usize,
    steps_exhausted: bool,
    displayed: Progress,
    overlay_hidden: bool,
    overlay_detached: bool,
    forced_by_ceiling: bool,

    step_timer: Option<TimerId>,
    poll_timer: Option<TimerId>,
    fonts_timer: Option<TimerId>,
    ceiling_timer: Option<TimerId>,
}

impl<S: DisplaySurface, E: Environment> LoadingController<S, E> {
    /// Validate `config` and start the sequence at virtual time zero.
    #[tracing::instrument(skip_all)]
    pub fn new(
        config: LoaderConfig,
        surface: S,
        env: E,
        initializers: Vec<Box<dyn PostLoadInitializer>>,
    ) -> FolioResult<Self> {
        config.validate()?;
        let readiness = ReadinessSet::new(config.dependencies.iter().map(|d| d.name.clone()))?;

        let mut ctl = Self {
            config,
            surface,
            env,
            timers: TimerQueue::new(),
            initializers,
            outcomes: Vec::new(),
            phase: Phase::Loading,
            phases: vec![PhaseChange {
                at: Millis::ZERO,
                phase: Phase::Loading,
            }],
            readiness,
            next_step: 0,
            steps_exhausted: false,
            displayed: Progress::ZERO,
            overlay_hidden: false,
            overlay_detached: false,
            forced_by_ceiling: false,
            step_timer: None,
            poll_timer: None,
            fonts_timer: None,
            ceiling_timer: None,
        };
        ctl.start();
        Ok(ctl)
    }

    fn start(&mut self) {
        let initial = self.config.initial_label.clone();
        self.show(&initial, Progress::ZERO);

        self.step_timer = Some(
            self.timers
                .set_interval(self.config.tick_interval_ms, LoaderEvent::StepTick),
        );
        self.poll_timer = Some(
            self.timers
                .set_interval(self.config.poll_interval_ms, LoaderEvent::Poll),
        );
        self.ceiling_timer = Some(
            self.timers
                .set_timeout(self.config.ceiling_ms, LoaderEvent::Ceiling),
        );

        if self.config.fonts_name().is_some() {
            self.fonts_timer = match self.env.fonts_signal() {
                FontsSignal::Unsupported => Some(
                    self.timers
                        .set_timeout(self.config.font_fallback_ms, LoaderEvent::FontsFallback),
                ),
                FontsSignal::ResolvesAfter(delay) => {
                    Some(self.timers.set_timeout(delay, LoaderEvent::FontsResolved))
                }
                FontsSignal::Never => None,
            };
        }

        tracing::debug!(
            steps = self.config.steps.len(),
            dependencies = self.readiness.len(),
            ceiling = %self.config.ceiling_ms,
            "loading sequence started"
        );
        self.poll_libraries();
        if self.readiness.is_satisfied() {
            cancel(&mut self.timers, &mut self.poll_timer);
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current readiness flags.
    pub fn readiness(&self) -> &ReadinessSet {
        &self.readiness
    }

    /// Last displayed percentage.
    pub fn displayed_progress(&self) -> Progress {
        self.displayed
    }

    /// `true` once every step has been shown.
    pub fn steps_exhausted(&self) -> bool {
        self.steps_exhausted
    }

    /// Number of timers still scheduled. Zero once `Done`.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Borrow the display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Recover the display surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Initializer outcomes recorded so far.
    pub fn outcomes(&self) -> &[InitOutcome] {
        &self.outcomes
    }

    /// Fire every timer due at or before `t`, then move the clock to `t`.
    pub fn advance_to(&mut self, t: Millis) {
        while let Some((_, event)) = self.timers.pop_due(t) {
            self.handle(event);
        }
        self.timers.advance_clock(t);
    }

    /// Advance the clock by `d`.
    pub fn advance_by(&mut self, d: Millis) {
        let t = self.now().saturating_add(d);
        self.advance_to(t);
    }

    /// Run until no timer remains and return the report.
    ///
    /// Terminates for every configuration because the ceiling timer forces finishing.
    #[tracing::instrument(skip(self))]
    pub fn run_to_completion(&mut self) -> LoadReport {
        while let Some(due) = self.timers.next_due() {
            self.advance_to(due);
        }
        self.report()
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> LoadReport {
        LoadReport {
            phases: self.phases.clone(),
            forced_by_ceiling: self.forced_by_ceiling,
            steps_shown: self.next_step,
            readiness: self.readiness.clone(),
            initializers: self.outcomes.clone(),
            final_progress: self.displayed,
        }
    }

    fn handle(&mut self, event: LoaderEvent) {
        tracing::trace!(?event, now = %self.now(), "timer fired");
        match event {
            LoaderEvent::StepTick => self.on_step_tick(),
            LoaderEvent::Poll => {
                if self.phase == Phase::Loading {
                    self.poll_libraries();
                    self.check_gate();
                }
            }
            LoaderEvent::FontsResolved | LoaderEvent::FontsFallback => {
                self.fonts_timer = None;
                self.on_fonts_ready(event == LoaderEvent::FontsFallback);
            }
            LoaderEvent::Ceiling => {
                // Requeue at the same instant so step, poll and fonts timers due now run first.
                self.ceiling_timer = (self.phase == Phase::Loading).then(|| {
                    self.timers
                        .set_timeout(Millis::ZERO, LoaderEvent::CeilingReached)
                });
            }
            LoaderEvent::CeilingReached => {
                self.ceiling_timer = None;
                if self.phase == Phase::Loading {
                    self.forced_by_ceiling = true;
                    tracing::warn!(
                        pending = ?self.readiness.pending(),
                        steps_exhausted = self.steps_exhausted,
                        "loading ceiling reached, finishing anyway"
                    );
                    self.begin_finishing();
                }
            }
            LoaderEvent::Settle => self.on_settle(),
            LoaderEvent::Detach => self.on_detach(),
        }
    }

    fn on_step_tick(&mut self) {
        if self.phase != Phase::Loading || self.steps_exhausted {
            return;
        }
        let Some(step) = self.config.steps.get(self.next_step).cloned() else {
            return;
        };
        self.next_step += 1;
        tracing::debug!(step = %step.label, progress = step.target.get(), "step");
        self.show(&step.label, step.target);

        if self.next_step >= self.config.steps.len() {
            self.steps_exhausted = true;
            cancel(&mut self.timers, &mut self.step_timer);
        }
        self.check_gate();
    }

    fn on_fonts_ready(&mut self, fallback: bool) {
        if self.phase != Phase::Loading {
            return;
        }
        let Some(name) = self.config.fonts_name().map(str::to_owned) else {
            return;
        };
        self.mark_ready(&name);
        tracing::debug!(fallback, "fonts ready");
        self.check_gate();
    }

    fn poll_libraries(&mut self) {
        let now = self.now();
        let ready: Vec<String> = self
            .config
            .library_names()
            .filter(|name| self.readiness.is_ready(name) == Some(false))
            .filter(|name| self.env.is_available(name, now))
            .map(str::to_owned)
            .collect();
        for name in ready {
            tracing::debug!(dependency = %name, %now, "dependency ready");
            self.mark_ready(&name);
        }
    }

    fn mark_ready(&mut self, name: &str) {
        if let Err(err) = self.readiness.mark_ready(name) {
            tracing::warn!(%err, "readiness update rejected");
        }
        if self.readiness.is_satisfied() {
            cancel(&mut self.timers, &mut self.poll_timer);
            cancel(&mut self.timers, &mut self.fonts_timer);
        }
    }

    fn check_gate(&mut self) {
        if self.phase == Phase::Loading && self.steps_exhausted && self.readiness.is_satisfied() {
            self.begin_finishing();
        }
    }

    fn begin_finishing(&mut self) {
        for slot in [
            &mut self.step_timer,
            &mut self.poll_timer,
            &mut self.fonts_timer,
            &mut self.ceiling_timer,
        ] {
            cancel(&mut self.timers, slot);
        }
        self.enter(Phase::Finishing);

        let label = self.config.completion_label.clone();
        self.show(&label, Progress::COMPLETE);
        self.timers
            .set_timeout(self.config.settle_delay_ms, LoaderEvent::Settle);
    }

    fn on_settle(&mut self) {
        self.hide_overlay();

        let mut initializers = std::mem::take(&mut self.initializers);
        let ctx = InitContext {
            now: self.now(),
            readiness: &self.readiness,
        };
        for init in &mut initializers {
            let outcome = run_contained(init.as_mut(), &ctx);
            self.outcomes.push(outcome);
        }

        self.timers
            .set_timeout(self.config.detach_delay_ms, LoaderEvent::Detach);
    }

    fn on_detach(&mut self) {
        if !self.overlay_detached {
            self.overlay_detached = true;
            if self.surface.has_target(Target::Overlay) {
                self.surface.detach(Target::Overlay);
            } else {
                tracing::trace!("overlay already absent, nothing to detach");
            }
        }
        self.timers.cancel_all();
        self.enter(Phase::Done);
        tracing::info!(
            at = %self.now(),
            forced = self.forced_by_ceiling,
            failed_initializers = self.outcomes.iter().filter(|o| !o.succeeded()).count(),
            "loading sequence done"
        );
    }

    fn hide_overlay(&mut self) {
        if self.overlay_hidden {
            return;
        }
        self.overlay_hidden = true;
        if self.surface.has_target(Target::Overlay) {
            self.surface
                .add_class(Target::Overlay, &self.config.hidden_class);
        } else {
            tracing::trace!("overlay target missing, skip hide");
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        self.phases.push(PhaseChange {
            at: self.now(),
            phase,
        });
    }

    fn show(&mut self, label: &str, progress: Progress) {
        let progress = progress.max(self.displayed);
        self.displayed = progress;

        for target in [Target::StatusText, Target::ProgressFill, Target::PercentText] {
            if !self.surface.has_target(target) {
                tracing::trace!(?target, "display target missing, skip update");
                continue;
            }
            match target {
                Target::StatusText => self.surface.set_text(target, label),
                Target::ProgressFill => self.surface.set_fill(target, progress),
                Target::PercentText => self.surface.set_text(target, &progress.label()),
                Target::Overlay => {}
            }
        }
    }
}

fn cancel(timers: &mut TimerQueue<LoaderEvent>, slot: &mut Option<TimerId>) {
    if let Some(id) = slot.take() {
        timers.cancel(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/controller.rs"]
mod tests;
