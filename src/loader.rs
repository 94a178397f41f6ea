//! Staged loading sequence: configuration, dependency readiness and the controller state machine.

/// Loader configuration.
pub mod config;
/// The loading controller state machine.
pub mod controller;
/// Dependency availability checks.
pub mod environment;
/// Post-load initializers and their contained invocation.
pub mod initializer;
/// Readiness flags for named dependencies.
pub mod readiness;
/// Progress steps.
pub mod step;
