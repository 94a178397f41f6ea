//! Post-load presentation effects fanned out by the loading controller.

/// Doughnut chart model.
pub mod chart;
/// Stat count-up animation.
pub mod counter;
/// Mouse-follow background motion and the hero gradient.
pub mod motion;
/// Intersection-driven reveals and skill bar staggering.
pub mod reveal;
/// Scroll-driven header, parallax and scroll-to-top state.
pub mod scroll;
/// Rotating typewriter subtitle.
pub mod typed;

use crate::foundation::core::{Millis, Progress};
use crate::loader::config::{ANIMATION_LIBRARY, CHART_LIBRARY, FeatureSet};
use crate::loader::initializer::{PostLoadInitializer, initializer};
use anyhow::Context as _;
use std::cell::RefCell;
use std::rc::Rc;

/// Static description of the page the effects attach to.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Number of `.geometric-shape` elements.
    pub shapes: usize,
    /// Number of `.floating-orb` elements.
    pub orbs: usize,
    /// Section names observed for reveal.
    pub sections: Vec<String>,
    /// Initial texts of the hero stat counters.
    pub stats: Vec<String>,
    /// Skill bar `data-width` percentages.
    pub skill_widths: Vec<u8>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            shapes: 4,
            orbs: 3,
            sections: ["hero", "about", "experience", "skills", "projects", "contact"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            stats: vec!["8+".to_owned(), "150+".to_owned(), "95%".to_owned()],
            skill_widths: vec![95, 90, 85, 92, 80],
        }
    }
}

/// Background motion wired at rest, with the pointer at the viewport center.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BackgroundEffects {
    /// Motion model driving shapes and orbs.
    pub motion: motion::BackgroundMotion,
    /// CSS transforms of every shape.
    pub shapes: Vec<String>,
    /// CSS transforms of every orb.
    pub orbs: Vec<String>,
    /// Initial hero gradient.
    pub gradient: String,
}

/// Observers and animations armed by the reveal initializer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealEffects {
    /// Section reveal observer.
    pub sections: reveal::RevealObserver,
    /// Observer starting the stat counters.
    pub stats: reveal::RevealObserver,
    /// Observer filling the skill bars.
    pub skills: reveal::RevealObserver,
    /// One counter per numeric stat.
    pub counters: Vec<counter::CounterAnimation>,
    /// Start offset and width of each skill bar.
    pub skill_bars: Vec<(Millis, Progress)>,
    /// Fade-up played on reveal; `None` when the animation library never loaded.
    pub fade_up: Option<reveal::RevealAnimation>,
}

/// Rendered skills chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartEffects {
    /// Arc layout.
    pub segments: Vec<chart::ArcSegment>,
    /// Chart.js configuration handed to the chart library.
    pub config: serde_json::Value,
}

/// Everything the post-load initializers set up. Sections stay `None` when their initializer
/// is disabled, has not run yet, or failed.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PageEffects {
    /// Background motion.
    pub background: Option<BackgroundEffects>,
    /// Scroll state at the top of the page.
    pub scroll: Option<scroll::ScrollState>,
    /// Reveal observers, counters and skill bars.
    pub reveal: Option<RevealEffects>,
    /// Skills chart.
    pub chart: Option<ChartEffects>,
    /// Typed subtitle.
    pub typed: Option<typed::TypedText>,
}

/// Post-load effects for one page, shared between its initializers and the caller.
///
/// Build the initializers with [`PostLoadEffects::initializers`], hand them to the controller,
/// then read the result back with [`PostLoadEffects::snapshot`].
#[derive(Clone, Debug)]
pub struct PostLoadEffects {
    features: FeatureSet,
    layout: PageLayout,
    state: Rc<RefCell<PageEffects>>,
}

impl PostLoadEffects {
    /// Effects for `layout` with the enabled `features`.
    pub fn new(features: FeatureSet, layout: PageLayout) -> Self {
        Self {
            features,
            layout,
            state: Rc::new(RefCell::new(PageEffects::default())),
        }
    }

    /// Copy of the effects set up so far.
    pub fn snapshot(&self) -> PageEffects {
        self.state.borrow().clone()
    }

    /// One initializer per enabled feature, in a fixed order:
    /// background, scroll, reveal, chart, typed text.
    pub fn initializers(&self) -> Vec<Box<dyn PostLoadInitializer>> {
        let mut out = Vec::new();
        let features = self.features;

        if features.background {
            let (shapes, orbs) = (self.layout.shapes, self.layout.orbs);
            let state = Rc::clone(&self.state);
            out.push(initializer("background-motion", move |_| {
                let motion = motion::BackgroundMotion::new(shapes, orbs);
                let at_rest = motion::Pointer::CENTER;
                let effects = BackgroundEffects {
                    motion,
                    shapes: motion.shape_transforms(at_rest).iter().map(|t| t.css()).collect(),
                    orbs: motion.orb_transforms(at_rest).iter().map(|t| t.css()).collect(),
                    gradient: motion::HueShift::default().gradient(),
                };
                tracing::debug!(shapes = effects.shapes.len(), "background motion wired");
                state.borrow_mut().background = Some(effects);
                Ok(())
            }));
        }

        if features.scroll {
            let state = Rc::clone(&self.state);
            out.push(initializer("scroll-effects", move |_| {
                let scroll = scroll::ScrollState::at(0.0);
                tracing::debug!(header = scroll.header.background, "scroll effects wired");
                state.borrow_mut().scroll = Some(scroll);
                Ok(())
            }));
        }

        if features.reveal {
            let layout = self.layout.clone();
            let state = Rc::clone(&self.state);
            out.push(initializer("section-reveal", move |ctx| {
                let effects = reveal_effects(&layout, ctx.is_ready(ANIMATION_LIBRARY))?;
                tracing::debug!(
                    sections = effects.sections.observed_len(),
                    counters = effects.counters.len(),
                    skill_bars = effects.skill_bars.len(),
                    animated = effects.fade_up.is_some(),
                    "reveal observers wired"
                );
                state.borrow_mut().reveal = Some(effects);
                Ok(())
            }));
        }

        if features.chart {
            let state = Rc::clone(&self.state);
            out.push(initializer("skills-chart", move |ctx| {
                ctx.require(CHART_LIBRARY).context("render skills chart")?;
                let chart = chart::DoughnutChart::skills();
                let effects = ChartEffects {
                    segments: chart.segments(),
                    config: chart.to_config_json(),
                };
                tracing::debug!(segments = effects.segments.len(), "skills chart rendered");
                state.borrow_mut().chart = Some(effects);
                Ok(())
            }));
        }

        if features.typed_text {
            let state = Rc::clone(&self.state);
            out.push(initializer("typed-text", move |_| {
                let typed = typed::TypedText::hero();
                tracing::debug!(strings = typed.strings().len(), "typed text started");
                state.borrow_mut().typed = Some(typed);
                Ok(())
            }));
        }

        out
    }
}

fn reveal_effects(layout: &PageLayout, animated: bool) -> anyhow::Result<RevealEffects> {
    let mut sections = reveal::RevealObserver::new(reveal::SECTION_THRESHOLD)?;
    for name in &layout.sections {
        sections.observe(name.clone());
    }
    let mut stats = reveal::RevealObserver::new(reveal::STATS_THRESHOLD)?;
    stats.observe("hero-stats");
    let mut skills = reveal::RevealObserver::new(reveal::SKILLS_THRESHOLD)?;
    skills.observe("skills");

    let counters = layout
        .stats
        .iter()
        .filter_map(|text| {
            counter::CounterAnimation::from_text(text, counter::CounterAnimation::DEFAULT_DURATION)
        })
        .collect();
    let widths = layout
        .skill_widths
        .iter()
        .map(|w| Progress::new(*w))
        .collect::<Result<Vec<_>, _>>()
        .context("skill bar widths")?;

    if !animated {
        tracing::warn!("animation library missing, sections reveal without fade-up");
    }
    Ok(RevealEffects {
        sections,
        stats,
        skills,
        counters,
        skill_bars: reveal::skill_bar_schedule(&widths),
        fade_up: animated.then(reveal::RevealAnimation::default),
    })
}

#[cfg(test)]
#[path = "../tests/unit/effects/wiring.rs"]
mod tests;
