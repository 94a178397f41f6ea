//! Display surface contract consumed by the loading controller.

use crate::foundation::core::Progress;
use std::collections::{BTreeMap, BTreeSet};

/// The four addressable targets of the loading overlay.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Full-surface overlay container.
    Overlay,
    /// Status text describing the current step.
    StatusText,
    /// Progress bar fill, driven by width percentage.
    ProgressFill,
    /// Percentage text, e.g. `"60%"`.
    PercentText,
}

impl Target {
    /// All targets, in a stable order.
    pub const ALL: [Target; 4] = [
        Target::Overlay,
        Target::StatusText,
        Target::ProgressFill,
        Target::PercentText,
    ];
}

/// Surface contract for the loading overlay.
///
/// Callers check [`DisplaySurface::has_target`] before each update; implementations may assume
/// updates only arrive for present targets.
pub trait DisplaySurface {
    /// Return `true` when `target` is currently addressable.
    fn has_target(&self, target: Target) -> bool;
    /// Replace the text content of `target`.
    fn set_text(&mut self, target: Target, text: &str);
    /// Set the fill width of `target` as a percentage.
    fn set_fill(&mut self, target: Target, progress: Progress);
    /// Add a style class to `target`.
    fn add_class(&mut self, target: Target, class: &str);
    /// Remove `target` from the surface entirely.
    fn detach(&mut self, target: Target);
}

/// One recorded mutation of an [`InMemorySurface`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Text content replaced.
    Text {
        /// Updated target.
        target: Target,
        /// New text.
        text: String,
    },
    /// Fill width changed.
    Fill {
        /// Updated target.
        target: Target,
        /// New width percentage.
        progress: Progress,
    },
    /// Class added.
    Class {
        /// Updated target.
        target: Target,
        /// Added class.
        class: String,
    },
    /// Target detached.
    Detach {
        /// Removed target.
        target: Target,
    },
}

/// In-memory surface for tests, simulation and debugging.
#[derive(Clone, Debug)]
pub struct InMemorySurface {
    attached: BTreeSet<Target>,
    texts: BTreeMap<Target, String>,
    fills: BTreeMap<Target, Progress>,
    classes: BTreeMap<Target, BTreeSet<String>>,
    events: Vec<SurfaceEvent>,
}

impl Default for InMemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySurface {
    /// Create a surface with all four targets attached.
    pub fn new() -> Self {
        Self::with_targets(Target::ALL)
    }

    /// Create a surface where only `targets` exist.
    pub fn with_targets(targets: impl IntoIterator<Item = Target>) -> Self {
        Self {
            attached: targets.into_iter().collect(),
            texts: BTreeMap::new(),
            fills: BTreeMap::new(),
            classes: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Remove `target` before the surface is handed to a controller.
    pub fn without(mut self, target: Target) -> Self {
        self.attached.remove(&target);
        self
    }

    /// Return `true` when `target` is attached.
    pub fn is_attached(&self, target: Target) -> bool {
        self.attached.contains(&target)
    }

    /// Current text of `target`, if any was written.
    pub fn text(&self, target: Target) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    /// Current fill width of `target`, if any was written.
    pub fn fill(&self, target: Target) -> Option<Progress> {
        self.fills.get(&target).copied()
    }

    /// Return `true` when `class` was added to `target`.
    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes
            .get(&target)
            .is_some_and(|set| set.contains(class))
    }

    /// Every mutation in the order it was applied.
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Every text written to [`Target::PercentText`], in order.
    pub fn percent_history(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Text {
                    target: Target::PercentText,
                    text,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of times `class` was added to `target`.
    pub fn class_add_count(&self, target: Target, class: &str) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(e, SurfaceEvent::Class { target: t, class: c } if *t == target && c == class)
            })
            .count()
    }

    /// Number of times `target` was detached.
    pub fn detach_count(&self, target: Target) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Detach { target: t } if *t == target))
            .count()
    }
}

impl DisplaySurface for InMemorySurface {
    fn has_target(&self, target: Target) -> bool {
        self.attached.contains(&target)
    }

    fn set_text(&mut self, target: Target, text: &str) {
        self.texts.insert(target, text.to_owned());
        self.events.push(SurfaceEvent::Text {
            target,
            text: text.to_owned(),
        });
    }

    fn set_fill(&mut self, target: Target, progress: Progress) {
        self.fills.insert(target, progress);
        self.events.push(SurfaceEvent::Fill { target, progress });
    }

    fn add_class(&mut self, target: Target, class: &str) {
        self.classes
            .entry(target)
            .or_default()
            .insert(class.to_owned());
        self.events.push(SurfaceEvent::Class {
            target,
            class: class.to_owned(),
        });
    }

    fn detach(&mut self, target: Target) {
        self.attached.remove(&target);
        self.events.push(SurfaceEvent::Detach { target });
    }
}

#[cfg(test)]
#[path = "../tests/unit/surface/surface.rs"]
mod tests;
