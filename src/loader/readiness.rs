use crate::foundation::error::{FolioError, FolioResult};
use std::collections::BTreeMap;

/// Ready flags for a fixed set of named dependencies.
///
/// Flags start `false` and may flip to `true` once; they never reset. Only the owning controller
/// mutates the set.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ReadinessSet {
    flags: BTreeMap<String, bool>,
}

impl ReadinessSet {
    /// Create a set with every flag `false`.
    pub fn new<I, S>(names: I) -> FolioResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags = BTreeMap::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(FolioError::validation("dependency name must not be empty"));
            }
            if flags.insert(name.clone(), false).is_some() {
                return Err(FolioError::validation(format!(
                    "duplicate dependency '{name}'"
                )));
            }
        }
        Ok(Self { flags })
    }

    /// Flip `name` to ready. Returns `true` only on the false→true transition.
    pub(crate) fn mark_ready(&mut self, name: &str) -> FolioResult<bool> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| FolioError::validation(format!("unknown dependency '{name}'")))?;
        let changed = !*flag;
        *flag = true;
        Ok(changed)
    }

    /// Ready flag for `name`, or `None` when it is not tracked.
    pub fn is_ready(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    /// Return `true` when every flag is set. An empty set is satisfied.
    pub fn is_satisfied(&self) -> bool {
        self.flags.values().all(|ready| *ready)
    }

    /// Names still waiting, in sorted order.
    pub fn pending(&self) -> Vec<&str> {
        self.flags
            .iter()
            .filter(|(_, ready)| !**ready)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate `(name, ready)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, ready)| (name.as_str(), *ready))
    }

    /// Number of tracked dependencies.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Return `true` when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/readiness.rs"]
mod tests;
