use crate::foundation::core::Millis;
use std::collections::BTreeMap;

/// How the host reports that web fonts finished loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontsSignal {
    /// The host has no fonts-ready signal; a fallback delay is used instead.
    Unsupported,
    /// The one-shot signal resolves after the given delay from start.
    ResolvesAfter(Millis),
    /// The signal exists but never resolves.
    Never,
}

/// Host environment queried by the loading controller.
pub trait Environment {
    /// Global availability check for a named library at virtual time `now`.
    fn is_available(&self, dependency: &str, now: Millis) -> bool;

    /// The fonts-ready signal offered by the host. Queried once at start.
    fn fonts_signal(&self) -> FontsSignal;
}

/// Environment whose libraries appear at scripted instants.
///
/// Libraries that were never scripted are never available.
#[derive(Clone, Debug)]
pub struct ScriptedEnvironment {
    available_at: BTreeMap<String, Millis>,
    fonts: FontsSignal,
}

impl Default for ScriptedEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedEnvironment {
    /// Empty script with no fonts signal.
    pub fn new() -> Self {
        Self {
            available_at: BTreeMap::new(),
            fonts: FontsSignal::Unsupported,
        }
    }

    /// Make `dependency` available from `at` onwards.
    pub fn available_at(mut self, dependency: impl Into<String>, at: Millis) -> Self {
        self.available_at.insert(dependency.into(), at);
        self
    }

    /// Make `dependency` available from the start.
    pub fn available_immediately(self, dependency: impl Into<String>) -> Self {
        self.available_at(dependency, Millis::ZERO)
    }

    /// Set the fonts-ready signal.
    pub fn fonts(mut self, signal: FontsSignal) -> Self {
        self.fonts = signal;
        self
    }
}

impl Environment for ScriptedEnvironment {
    fn is_available(&self, dependency: &str, now: Millis) -> bool {
        self.available_at
            .get(dependency)
            .is_some_and(|at| *at <= now)
    }

    fn fonts_signal(&self) -> FontsSignal {
        self.fonts
    }
}
