use super::*;
use crate::loader::initializer::{InitContext, InitOutcome, InitStatus, run_contained};
use crate::loader::readiness::ReadinessSet;

fn readiness(ready: &[&str]) -> ReadinessSet {
    let mut set = ReadinessSet::new([ANIMATION_LIBRARY, "fonts", CHART_LIBRARY]).unwrap();
    for name in ready {
        set.mark_ready(name).unwrap();
    }
    set
}

fn run_all(effects: &PostLoadEffects, readiness: &ReadinessSet) -> Vec<InitOutcome> {
    let ctx = InitContext {
        now: Millis(1_100),
        readiness,
    };
    effects
        .initializers()
        .iter_mut()
        .map(|i| run_contained(i.as_mut(), &ctx))
        .collect()
}

#[test]
fn every_feature_yields_one_initializer_in_order() {
    let effects = PostLoadEffects::new(FeatureSet::default(), PageLayout::default());
    let inits = effects.initializers();
    let names: Vec<&str> = inits.iter().map(|i| i.name()).collect();
    assert_eq!(
        names,
        vec![
            "background-motion",
            "scroll-effects",
            "section-reveal",
            "skills-chart",
            "typed-text"
        ]
    );
}

#[test]
fn disabled_features_are_skipped() {
    let features = FeatureSet {
        chart: false,
        background: false,
        ..FeatureSet::default()
    };
    let effects = PostLoadEffects::new(features, PageLayout::default());
    assert_eq!(effects.initializers().len(), 3);

    run_all(&effects, &readiness(&[ANIMATION_LIBRARY, "fonts", CHART_LIBRARY]));
    let page = effects.snapshot();
    assert!(page.chart.is_none());
    assert!(page.background.is_none());
    assert!(page.typed.is_some());
}

#[test]
fn state_outlives_the_initializers() {
    let effects = PostLoadEffects::new(FeatureSet::default(), PageLayout::default());
    assert_eq!(effects.snapshot(), PageEffects::default());

    let outcomes = run_all(&effects, &readiness(&[ANIMATION_LIBRARY, "fonts", CHART_LIBRARY]));
    assert!(outcomes.iter().all(InitOutcome::succeeded));

    let page = effects.snapshot();
    let background = page.background.unwrap();
    assert_eq!(background.shapes.len(), 4);
    assert_eq!(background.orbs.len(), 3);
    assert!(!page.scroll.unwrap().scroll_top_visible);

    let reveal = page.reveal.unwrap();
    assert_eq!(reveal.sections.observed_len(), 6);
    assert_eq!(reveal.counters.len(), 3);
    assert_eq!(reveal.skill_bars.len(), 5);
    assert_eq!(reveal.skill_bars[4].0, Millis(800));
    assert!(reveal.fade_up.is_some());

    let chart = page.chart.unwrap();
    assert_eq!(chart.segments.len(), 5);
    assert_eq!(chart.config["type"], "doughnut");
    assert_eq!(page.typed.unwrap().strings().len(), 4);
}

#[test]
fn chart_fails_when_chart_library_never_loaded() {
    let effects = PostLoadEffects::new(FeatureSet::default(), PageLayout::default());
    let outcomes = run_all(&effects, &readiness(&[ANIMATION_LIBRARY, "fonts"]));

    let failed: Vec<&InitOutcome> = outcomes.iter().filter(|o| !o.succeeded()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name, "skills-chart");
    assert!(matches!(
        &failed[0].status,
        InitStatus::Failed { reason } if reason.contains("chart-library")
    ));

    let page = effects.snapshot();
    assert!(page.chart.is_none());
    assert!(page.reveal.is_some());
    assert!(page.typed.is_some());
}

#[test]
fn reveal_degrades_without_animation_library() {
    let effects = PostLoadEffects::new(FeatureSet::default(), PageLayout::default());
    let outcomes = run_all(&effects, &readiness(&["fonts", CHART_LIBRARY]));
    assert!(outcomes.iter().all(InitOutcome::succeeded));

    let reveal = effects.snapshot().reveal.unwrap();
    assert!(reveal.fade_up.is_none());
    assert_eq!(reveal.counters.len(), 3);
}

#[test]
fn bad_skill_width_fails_only_the_reveal_initializer() {
    let layout = PageLayout {
        skill_widths: vec![50, 140],
        ..PageLayout::default()
    };
    let effects = PostLoadEffects::new(FeatureSet::default(), layout);
    let outcomes = run_all(&effects, &readiness(&[ANIMATION_LIBRARY, "fonts", CHART_LIBRARY]));
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.succeeded())
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(failed, vec!["section-reveal"]);
    assert!(effects.snapshot().reveal.is_none());
}

#[test]
fn page_effects_serialize_with_chart_config() {
    let effects = PostLoadEffects::new(FeatureSet::default(), PageLayout::default());
    run_all(&effects, &readiness(&[ANIMATION_LIBRARY, "fonts", CHART_LIBRARY]));

    let v = serde_json::to_value(effects.snapshot()).unwrap();
    assert_eq!(v["chart"]["config"]["type"], "doughnut");
    assert_eq!(v["reveal"]["sections"]["threshold"], 0.15);
    assert!(v["typed"]["strings"].is_array());
}
