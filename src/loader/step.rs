use crate::foundation::core::Progress;
use crate::foundation::error::{FolioError, FolioResult};

/// One named stage of the loading indicator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Status text shown while this step is current.
    pub label: String,
    /// Percentage displayed once this step is reached.
    pub target: Progress,
}

impl Step {
    /// Create a step, validating the percentage.
    pub fn new(label: impl Into<String>, target: u8) -> FolioResult<Self> {
        Ok(Self {
            label: label.into(),
            target: Progress::new(target)?,
        })
    }
}

/// Ordered, non-decreasing list of steps that ends at 100%.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Validate and wrap `steps`.
    pub fn new(steps: Vec<Step>) -> FolioResult<Self> {
        let Some(last) = steps.last() else {
            return Err(FolioError::validation("step sequence must not be empty"));
        };
        if !last.target.is_complete() {
            return Err(FolioError::validation(format!(
                "step sequence must end at 100%, last step '{}' ends at {}",
                last.label,
                last.target.label()
            )));
        }
        for pair in steps.windows(2) {
            if pair[1].target < pair[0].target {
                return Err(FolioError::validation(format!(
                    "step '{}' ({}) goes backwards from '{}' ({})",
                    pair[1].label,
                    pair[1].target.label(),
                    pair[0].label,
                    pair[0].target.label()
                )));
            }
        }
        Ok(Self { steps })
    }

    /// Build a sequence from `(label, percentage)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u8)>) -> FolioResult<Self> {
        let steps = pairs
            .into_iter()
            .map(|(label, pct)| Step::new(label, pct))
            .collect::<FolioResult<Vec<_>>>()?;
        Self::new(steps)
    }

    /// Borrow the steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<&Step> {
        self.steps.get(idx)
    }

    /// Number of steps. Never zero.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        let steps = [
            ("Loading assets...", 20),
            ("Preparing animations...", 45),
            ("Loading fonts...", 70),
            ("Almost ready...", 90),
            ("Finalizing...", 100),
        ]
        .into_iter()
        .map(|(label, pct)| Step {
            label: label.to_owned(),
            target: Progress::new(pct).unwrap_or(Progress::COMPLETE),
        })
        .collect();
        Self { steps }
    }
}

impl TryFrom<Vec<Step>> for StepSequence {
    type Error = FolioError;

    fn try_from(steps: Vec<Step>) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<StepSequence> for Vec<Step> {
    fn from(seq: StepSequence) -> Self {
        seq.steps
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/step.rs"]
mod tests;
