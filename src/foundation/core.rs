use crate::foundation::error::{FolioError, FolioResult};

/// Virtual time in whole milliseconds since the owning controller started.
///
/// Used both as an instant and as a duration; the scheduler never runs backwards.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Saturating addition of a duration.
    pub fn saturating_add(self, d: Millis) -> Self {
        Self(self.0.saturating_add(d.0))
    }

    /// Saturating distance from `earlier` to `self`.
    pub fn saturating_since(self, earlier: Millis) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Convert to seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Whole-number completion percentage in `[0, 100]`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// 0%.
    pub const ZERO: Self = Self(0);
    /// 100%.
    pub const COMPLETE: Self = Self(100);

    /// Create a validated percentage.
    pub fn new(pct: u8) -> FolioResult<Self> {
        if pct > 100 {
            return Err(FolioError::validation(format!(
                "progress must be in [0, 100], got {pct}"
            )));
        }
        Ok(Self(pct))
    }

    /// Raw percentage value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Return `true` at 100%.
    pub fn is_complete(self) -> bool {
        self.0 == 100
    }

    /// Fraction in `[0, 1]`.
    pub fn as_fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Text shown in the percentage target, e.g. `"60%"`.
    pub fn label(self) -> String {
        format!("{}%", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u8::deserialize(deserializer)?;
        Progress::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
