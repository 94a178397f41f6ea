use super::*;

fn run(init: &mut dyn PostLoadInitializer) -> InitOutcome {
    let readiness = ReadinessSet::new(["chart-library"]).unwrap();
    let ctx = InitContext {
        now: Millis(1_100),
        readiness: &readiness,
    };
    run_contained(init, &ctx)
}

#[test]
fn success_is_recorded() {
    let mut init = initializer("background", |_| Ok(()));
    let outcome = run(init.as_mut());
    assert_eq!(outcome.name, "background");
    assert!(outcome.succeeded());
}

#[test]
fn errors_are_contained_with_context() {
    use anyhow::Context as _;

    let mut init = initializer("chart", |_| {
        Err(anyhow::anyhow!("Chart is not defined")).context("render skills chart")
    });
    let outcome = run(init.as_mut());
    let InitStatus::Failed { reason } = outcome.status else {
        panic!("expected failure");
    };
    assert!(reason.contains("render skills chart"));
    assert!(reason.contains("Chart is not defined"));
}

#[test]
fn panics_are_contained() {
    let mut init = initializer("typed-text", |_| panic!("missing #typed-text"));
    let outcome = run(init.as_mut());
    assert_eq!(
        outcome.status,
        InitStatus::Failed {
            reason: "panicked: missing #typed-text".to_owned()
        }
    );
}

#[test]
fn outcome_serializes_flat() {
    let outcome = InitOutcome {
        name: "scroll".to_owned(),
        status: InitStatus::Succeeded,
    };
    let v = serde_json::to_value(&outcome).unwrap();
    assert_eq!(v["name"], "scroll");
    assert_eq!(v["status"], "succeeded");
}

#[test]
fn context_reports_dependency_readiness() {
    let mut readiness = ReadinessSet::new(["chart-library", "fonts"]).unwrap();
    readiness.mark_ready("fonts").unwrap();
    let ctx = InitContext {
        now: Millis(1_100),
        readiness: &readiness,
    };

    assert!(ctx.is_ready("fonts"));
    assert!(!ctx.is_ready("chart-library"));
    assert!(ctx.is_ready("untracked"));

    let err = ctx.require("chart-library").unwrap_err();
    assert!(err.to_string().contains("chart-library"));
    assert!(ctx.require("fonts").is_ok());
}

#[test]
fn initializer_sees_the_context() {
    let mut init = initializer("chart", |ctx| ctx.require("chart-library"));
    let outcome = run(init.as_mut());
    assert!(!outcome.succeeded());
}
