use crate::foundation::core::Millis;
use crate::foundation::error::{FolioError, FolioResult};
use crate::loader::step::StepSequence;
use std::collections::BTreeSet;
use std::io::Read;

/// Name of the animate-on-scroll library dependency.
pub const ANIMATION_LIBRARY: &str = "animation-library";
/// Name of the web fonts dependency.
pub const FONTS: &str = "fonts";
/// Name of the charting library dependency.
pub const CHART_LIBRARY: &str = "chart-library";

/// How a dependency's readiness is observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Polled through [`crate::Environment::is_available`].
    Library,
    /// Observed through the fonts-ready signal or the fallback delay.
    Fonts,
}

/// One named dependency the loader waits for.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DependencySpec {
    /// Dependency name, unique within a config.
    pub name: String,
    /// How readiness is observed.
    pub kind: DependencyKind,
}

impl DependencySpec {
    /// A polled library dependency.
    pub fn library(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DependencyKind::Library,
        }
    }

    /// The fonts dependency.
    pub fn fonts() -> Self {
        Self {
            name: FONTS.to_owned(),
            kind: DependencyKind::Fonts,
        }
    }
}

/// Which post-load collaborators are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Mouse-follow shapes and the hue-shifting hero gradient.
    pub background: bool,
    /// Header style, parallax and scroll-to-top wiring.
    pub scroll: bool,
    /// Section reveal, stat counter and skill bar observers.
    pub reveal: bool,
    /// Doughnut skills chart.
    pub chart: bool,
    /// Rotating typed subtitle.
    pub typed_text: bool,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            background: true,
            scroll: true,
            reveal: true,
            chart: true,
            typed_text: true,
        }
    }
}

/// Complete loader configuration. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Steps shown by the progress indicator.
    pub steps: StepSequence,
    /// Status text shown before the first step tick.
    pub initial_label: String,
    /// Status text shown once finishing begins.
    pub completion_label: String,
    /// Dependencies gating completion.
    pub dependencies: Vec<DependencySpec>,
    /// Step tick interval.
    pub tick_interval_ms: Millis,
    /// Readiness poll interval.
    pub poll_interval_ms: Millis,
    /// Hard upper bound before finishing is forced.
    pub ceiling_ms: Millis,
    /// Delay between the completion message and hiding the overlay.
    pub settle_delay_ms: Millis,
    /// Delay between hiding and detaching the overlay.
    pub detach_delay_ms: Millis,
    /// Fonts fallback delay when the host has no fonts-ready signal.
    pub font_fallback_ms: Millis,
    /// Class that hides the overlay.
    pub hidden_class: String,
    /// Enabled post-load collaborators.
    pub features: FeatureSet,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            steps: StepSequence::default(),
            initial_label: "Initializing...".to_owned(),
            completion_label: "Ready!".to_owned(),
            dependencies: vec![
                DependencySpec::library(ANIMATION_LIBRARY),
                DependencySpec::fonts(),
                DependencySpec::library(CHART_LIBRARY),
            ],
            tick_interval_ms: Millis(200),
            poll_interval_ms: Millis(100),
            ceiling_ms: Millis(2_500),
            settle_delay_ms: Millis(500),
            detach_delay_ms: Millis(500),
            font_fallback_ms: Millis(300),
            hidden_class: "hidden".to_owned(),
            features: FeatureSet::default(),
        }
    }
}

impl LoaderConfig {
    /// Accepted ceiling range, inclusive.
    pub const CEILING_RANGE: (Millis, Millis) = (Millis(2_000), Millis(3_000));
    /// Accepted fonts fallback range, inclusive.
    pub const FONT_FALLBACK_RANGE: (Millis, Millis) = (Millis(300), Millis(500));

    /// Parse a JSON config and validate it.
    pub fn from_reader(reader: impl Read) -> FolioResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| FolioError::serde(format!("loader config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON config string and validate it.
    pub fn from_json_str(s: &str) -> FolioResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Check timing ranges and dependency names.
    pub fn validate(&self) -> FolioResult<()> {
        if self.tick_interval_ms == Millis::ZERO {
            return Err(FolioError::config("tick_interval_ms must be > 0"));
        }
        if self.poll_interval_ms == Millis::ZERO {
            return Err(FolioError::config("poll_interval_ms must be > 0"));
        }
        let (lo, hi) = Self::CEILING_RANGE;
        if self.ceiling_ms < lo || self.ceiling_ms > hi {
            return Err(FolioError::config(format!(
                "ceiling_ms must be in [{lo}, {hi}], got {}",
                self.ceiling_ms
            )));
        }
        let (lo, hi) = Self::FONT_FALLBACK_RANGE;
        if self.font_fallback_ms < lo || self.font_fallback_ms > hi {
            return Err(FolioError::config(format!(
                "font_fallback_ms must be in [{lo}, {hi}], got {}",
                self.font_fallback_ms
            )));
        }
        if self.hidden_class.trim().is_empty() {
            return Err(FolioError::config("hidden_class must not be empty"));
        }

        let mut seen = BTreeSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(FolioError::config("dependency name must not be empty"));
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(FolioError::config(format!(
                    "duplicate dependency '{}'",
                    dep.name
                )));
            }
        }
        let fonts = self
            .dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Fonts)
            .count();
        if fonts > 1 {
            return Err(FolioError::config("at most one fonts dependency is allowed"));
        }
        Ok(())
    }

    /// Names of the polled library dependencies.
    pub fn library_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Library)
            .map(|d| d.name.as_str())
    }

    /// Name of the fonts dependency, if configured.
    pub fn fonts_name(&self) -> Option<&str> {
        self.dependencies
            .iter()
            .find(|d| d.kind == DependencyKind::Fonts)
            .map(|d| d.name.as_str())
    }

    /// Latest instant by which a controller built from this config reaches `Done`.
    pub fn worst_case_duration(&self) -> Millis {
        self.ceiling_ms
            .saturating_add(self.settle_delay_ms)
            .saturating_add(self.detach_delay_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/config.rs"]
mod tests;
