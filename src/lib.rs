//! Folio is a deterministic presentation runtime for a single-page portfolio site.
//!
//! The centerpiece is the [`LoadingController`]: a staged loading screen that steps a progress
//! indicator through named stages while polling for external dependencies, then hides the overlay
//! and fans out to post-load effects. Everything runs on one cooperative virtual-time scheduler,
//! so a full loading sequence can be replayed and asserted on without a browser.
//!
//! - Configure a [`LoaderConfig`] (or use the defaults)
//! - Provide a [`DisplaySurface`] and an [`Environment`]
//! - Register [`PostLoadInitializer`]s and drive the controller to completion
//!
//! The [`cache_bust`] module carries the build-time helper that rewrites versioned asset links.
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod cache_bust;
pub mod effects;
pub mod loader;
pub(crate) mod runtime;
pub mod surface;

pub use crate::foundation::core::{Millis, Progress};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::animation::ease::Ease;
pub use crate::cache_bust::{BustReport, bust_file, bust_versions};
pub use crate::loader::config::{DependencyKind, DependencySpec, FeatureSet, LoaderConfig};
pub use crate::loader::controller::{LoadReport, LoadingController, Phase, PhaseChange};
pub use crate::loader::environment::{Environment, FontsSignal, ScriptedEnvironment};
pub use crate::loader::initializer::{
    InitContext, InitOutcome, InitStatus, PostLoadInitializer, initializer,
};
pub use crate::loader::readiness::ReadinessSet;
pub use crate::loader::step::{Step, StepSequence};
pub use crate::surface::{DisplaySurface, InMemorySurface, SurfaceEvent, Target};
