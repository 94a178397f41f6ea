use crate::animation::ease::Ease;
use crate::foundation::core::{Millis, Progress};
use crate::foundation::error::{FolioError, FolioResult};
use std::collections::BTreeSet;

/// Class applied to sections until they scroll into view.
pub const SECTION_HIDDEN_CLASS: &str = "section-hidden";
/// Visible ratio that reveals a section.
pub const SECTION_THRESHOLD: f64 = 0.15;
/// Visible ratio that starts the hero stat counters.
pub const STATS_THRESHOLD: f64 = 0.5;
/// Visible ratio that fills the skill bars.
pub const SKILLS_THRESHOLD: f64 = 0.3;
/// Visible ratio that renders the skills chart.
pub const CHART_THRESHOLD: f64 = 0.3;
/// Delay between consecutive skill bars.
pub const SKILL_BAR_STAGGER: Millis = Millis(200);

/// One-shot intersection observer over named elements.
///
/// An element fires once when its visible ratio reaches the threshold and is then unobserved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealObserver {
    threshold: f64,
    observed: BTreeSet<String>,
    fired: Vec<String>,
}

impl RevealObserver {
    /// Observer firing at `threshold` in `[0, 1]`.
    pub fn new(threshold: f64) -> FolioResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(FolioError::validation(format!(
                "intersection threshold must be in [0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            observed: BTreeSet::new(),
            fired: Vec::new(),
        })
    }

    /// Start observing `name`. Already fired elements are not observed again.
    pub fn observe(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.fired.contains(&name) {
            self.observed.insert(name);
        }
    }

    /// Report that `name` is `ratio` visible. Returns `true` when this report fires it.
    pub fn report(&mut self, name: &str, ratio: f64) -> bool {
        let intersecting = ratio > 0.0 && ratio >= self.threshold;
        if !intersecting || !self.observed.remove(name) {
            return false;
        }
        self.fired.push(name.to_owned());
        true
    }

    /// Return `true` when `name` already fired.
    pub fn has_fired(&self, name: &str) -> bool {
        self.fired.iter().any(|n| n == name)
    }

    /// Elements fired so far, in firing order.
    pub fn fired(&self) -> &[String] {
        &self.fired
    }

    /// Number of elements still observed.
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }
}

/// When each skill bar starts filling, and to what width.
pub fn skill_bar_schedule(widths: &[Progress]) -> Vec<(Millis, Progress)> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| (Millis(SKILL_BAR_STAGGER.0 * i as u64), *w))
        .collect()
}

/// Fade-up animation played when an element is revealed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealAnimation {
    /// Total animation length.
    pub duration: Millis,
    /// Initial downward offset in px.
    pub offset: f64,
    /// Timing curve.
    pub ease: Ease,
}

impl Default for RevealAnimation {
    fn default() -> Self {
        Self {
            duration: Millis(1_000),
            offset: 100.0,
            ease: Ease::CSS_EASE_IN_OUT,
        }
    }
}

impl RevealAnimation {
    /// Animation using a CSS timing function such as `"ease-in-out"`.
    pub fn with_css_timing(duration: Millis, offset: f64, timing: &str) -> FolioResult<Self> {
        Ok(Self {
            duration,
            offset,
            ease: Ease::from_css(timing)?,
        })
    }

    /// `(opacity, translate_y)` at `elapsed` since the reveal fired.
    pub fn frame(&self, elapsed: Millis) -> (f64, f64) {
        let t = if self.duration == Millis::ZERO {
            1.0
        } else {
            elapsed.0 as f64 / self.duration.0 as f64
        };
        let e = self.ease.apply(t);
        (e, self.offset * (1.0 - e))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reveal.rs"]
mod tests;
