use crate::foundation::core::Millis;
use crate::loader::readiness::ReadinessSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// What an initializer can see of the finished loading sequence.
#[derive(Clone, Copy, Debug)]
pub struct InitContext<'a> {
    /// Virtual time of the call.
    pub now: Millis,
    /// Readiness flags as they stood when the overlay was hidden.
    pub readiness: &'a ReadinessSet,
}

impl InitContext<'_> {
    /// Return `true` when `dependency` is ready. Untracked dependencies count as ready.
    pub fn is_ready(&self, dependency: &str) -> bool {
        self.readiness.is_ready(dependency).unwrap_or(true)
    }

    /// Fail with a readable error when `dependency` never became ready.
    pub fn require(&self, dependency: &str) -> anyhow::Result<()> {
        if self.is_ready(dependency) {
            Ok(())
        } else {
            anyhow::bail!("dependency '{dependency}' is not loaded")
        }
    }
}

/// A fire-once setup call made after the loading overlay is hidden.
pub trait PostLoadInitializer {
    /// Stable name used in logs and outcomes.
    fn name(&self) -> &str;
    /// Perform the setup.
    fn init(&mut self, ctx: &InitContext<'_>) -> anyhow::Result<()>;
}

struct FnInitializer<F> {
    name: String,
    f: F,
}

impl<F> PostLoadInitializer for FnInitializer<F>
where
    F: FnMut(&InitContext<'_>) -> anyhow::Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &InitContext<'_>) -> anyhow::Result<()> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as a boxed [`PostLoadInitializer`].
pub fn initializer<F>(name: impl Into<String>, f: F) -> Box<dyn PostLoadInitializer>
where
    F: FnMut(&InitContext<'_>) -> anyhow::Result<()> + 'static,
{
    Box::new(FnInitializer {
        name: name.into(),
        f,
    })
}

/// Result of one contained initializer call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InitStatus {
    /// The initializer returned `Ok`.
    Succeeded,
    /// The initializer returned an error or panicked.
    Failed {
        /// Rendered error chain or panic message.
        reason: String,
    },
}

/// Recorded outcome of a post-load initializer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct InitOutcome {
    /// Initializer name.
    pub name: String,
    /// What happened.
    #[serde(flatten)]
    pub status: InitStatus,
}

impl InitOutcome {
    /// Return `true` for [`InitStatus::Succeeded`].
    pub fn succeeded(&self) -> bool {
        self.status == InitStatus::Succeeded
    }
}

/// Invoke `init` so that neither an error nor a panic escapes.
pub(crate) fn run_contained(
    init: &mut dyn PostLoadInitializer,
    ctx: &InitContext<'_>,
) -> InitOutcome {
    let name = init.name().to_owned();
    let status = match catch_unwind(AssertUnwindSafe(|| init.init(ctx))) {
        Ok(Ok(())) => InitStatus::Succeeded,
        Ok(Err(err)) => InitStatus::Failed {
            reason: format!("{err:#}"),
        },
        Err(payload) => InitStatus::Failed {
            reason: panic_message(payload.as_ref()),
        },
    };

    match &status {
        InitStatus::Succeeded => tracing::debug!(initializer = %name, "post-load initializer ran"),
        InitStatus::Failed { reason } => {
            tracing::warn!(initializer = %name, %reason, "post-load initializer failed")
        }
    }
    InitOutcome { name, status }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/initializer.rs"]
mod tests;
