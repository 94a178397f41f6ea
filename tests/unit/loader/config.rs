use super::*;

#[test]
fn defaults_validate() {
    let cfg = LoaderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.fonts_name(), Some(FONTS));
    assert_eq!(
        cfg.library_names().collect::<Vec<_>>(),
        vec![ANIMATION_LIBRARY, CHART_LIBRARY]
    );
    assert_eq!(cfg.worst_case_duration(), Millis(3_500));
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = LoaderConfig::from_json_str(
        r#"{
            "steps": [{"label": "A", "target": 30}, {"label": "B", "target": 100}],
            "ceiling_ms": 2000,
            "features": {"chart": false}
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.steps.len(), 2);
    assert_eq!(cfg.ceiling_ms, Millis(2_000));
    assert_eq!(cfg.tick_interval_ms, Millis(200));
    assert!(!cfg.features.chart);
    assert!(cfg.features.background);
}

#[test]
fn out_of_range_timings_are_rejected() {
    let err = LoaderConfig::from_json_str(r#"{"ceiling_ms": 10000}"#).unwrap_err();
    assert!(err.to_string().contains("ceiling_ms"));

    let err = LoaderConfig::from_json_str(r#"{"font_fallback_ms": 100}"#).unwrap_err();
    assert!(err.to_string().contains("font_fallback_ms"));

    let err = LoaderConfig::from_json_str(r#"{"tick_interval_ms": 0}"#).unwrap_err();
    assert!(err.to_string().contains("tick_interval_ms"));
}

#[test]
fn dependency_rules_are_enforced() {
    let mut cfg = LoaderConfig::default();
    cfg.dependencies.push(DependencySpec::library(ANIMATION_LIBRARY));
    assert!(cfg.validate().is_err());

    let mut cfg = LoaderConfig::default();
    cfg.dependencies.push(DependencySpec {
        name: "icons".to_owned(),
        kind: DependencyKind::Fonts,
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn unknown_fields_and_bad_steps_fail_to_parse() {
    assert!(LoaderConfig::from_json_str(r#"{"tick": 5}"#).is_err());
    assert!(
        LoaderConfig::from_json_str(r#"{"steps": [{"label": "A", "target": 50}]}"#).is_err()
    );
}
