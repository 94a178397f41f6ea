use crate::foundation::core::Millis;
use crate::foundation::error::{FolioError, FolioResult};

/// Rotating typewriter subtitle.
///
/// Each string is typed one character per `type_speed`, held for `back_delay`, then erased one
/// character per `back_speed` before the next string starts. With `looping` the cycle repeats;
/// without it the last string stays typed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TypedText {
    strings: Vec<String>,
    type_speed: Millis,
    back_speed: Millis,
    back_delay: Millis,
    looping: bool,
}

impl TypedText {
    /// Validate and build a typed text rotation.
    pub fn new(
        strings: Vec<String>,
        type_speed: Millis,
        back_speed: Millis,
        back_delay: Millis,
        looping: bool,
    ) -> FolioResult<Self> {
        if strings.is_empty() {
            return Err(FolioError::validation("typed text needs at least one string"));
        }
        if type_speed == Millis::ZERO || back_speed == Millis::ZERO {
            return Err(FolioError::validation("typed text speeds must be > 0"));
        }
        Ok(Self {
            strings,
            type_speed,
            back_speed,
            back_delay,
            looping,
        })
    }

    /// The portfolio hero subtitle.
    pub fn hero() -> Self {
        Self {
            strings: [
                "Associate Manager, Operational Excellence",
                "Product Management Expert",
                "Digital Transformation Leader",
                "Innovation Driver",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            type_speed: Millis(80),
            back_speed: Millis(50),
            back_delay: Millis(2_000),
            looping: true,
        }
    }

    /// Rotated strings.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    fn cycle_len(&self, s: &str) -> u64 {
        let n = s.chars().count() as u64;
        n * self.type_speed.0 + self.back_delay.0 + n * self.back_speed.0
    }

    /// Total length of one pass through every string.
    pub fn loop_len(&self) -> Millis {
        Millis(self.strings.iter().map(|s| self.cycle_len(s)).sum())
    }

    /// Visible text at `elapsed`.
    pub fn visible_at(&self, elapsed: Millis) -> String {
        let total = self.loop_len().0;
        let mut t = elapsed.0;
        if total > 0 && t >= total {
            if !self.looping {
                return self.strings.last().cloned().unwrap_or_default();
            }
            t %= total;
        }

        let last = self.strings.len() - 1;
        for (i, s) in self.strings.iter().enumerate() {
            let n = s.chars().count() as u64;
            let typing = n * self.type_speed.0;
            let holding = typing + self.back_delay.0;
            let cycle = self.cycle_len(s);
            if t < cycle {
                // Without looping the final string is never erased.
                let keep = !self.looping && i == last;
                let shown = if t < typing {
                    t / self.type_speed.0
                } else if t < holding || keep {
                    n
                } else {
                    n - ((t - holding) / self.back_speed.0 + 1).min(n)
                };
                return s.chars().take(shown as usize).collect();
            }
            t -= cycle;
        }
        String::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/typed.rs"]
mod tests;
