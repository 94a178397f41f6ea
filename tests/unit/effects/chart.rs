use super::*;

fn strings(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn segments_cover_the_full_circle() {
    let chart = DoughnutChart::skills();
    let segs = chart.segments();
    assert_eq!(segs.len(), 5);
    assert_eq!(segs[0].start_deg, 0.0);
    assert_eq!(segs.last().unwrap().end_deg, 360.0);
    for w in segs.windows(2) {
        assert_eq!(w[0].end_deg, w[1].start_deg);
    }
    let shares: f64 = segs.iter().map(|s| s.share).sum();
    assert!((shares - 1.0).abs() < 1e-9);
}

#[test]
fn equal_values_split_evenly() {
    let chart = DoughnutChart::new(
        strings(&["a", "b"]),
        vec![1.0, 1.0],
        strings(&["#000", "#fff"]),
        50,
    )
    .unwrap();
    let segs = chart.segments();
    assert_eq!(segs[0].end_deg, 180.0);
    assert_eq!(segs[1].share, 0.5);
}

#[test]
fn invalid_datasets_are_rejected() {
    let c = |labels: &[&str], values: Vec<f64>, colors: &[&str]| {
        DoughnutChart::new(strings(labels), values, strings(colors), 60)
    };
    assert!(c(&[], vec![], &[]).is_err());
    assert!(c(&["a"], vec![1.0, 2.0], &["#000"]).is_err());
    assert!(c(&["a"], vec![-1.0], &["#000"]).is_err());
    assert!(c(&["a"], vec![0.0], &["#000"]).is_err());
    assert!(c(&["a"], vec![f64::NAN], &["#000"]).is_err());
}

#[test]
fn config_json_matches_doughnut_shape() {
    let v = DoughnutChart::skills().to_config_json();
    assert_eq!(v["type"], "doughnut");
    assert_eq!(v["data"]["labels"][0], "Product Management");
    assert_eq!(v["data"]["datasets"][0]["cutout"], "60%");
    assert_eq!(v["data"]["datasets"][0]["data"][3], 92.0);
    assert_eq!(v["options"]["plugins"]["legend"]["position"], "bottom");
}

#[test]
fn deserialize_runs_dataset_checks() {
    let empty = r#"{"labels":[],"values":[],"colors":[],"cutout_pct":250}"#;
    assert!(serde_json::from_str::<DoughnutChart>(empty).is_err());

    let uneven = r##"{"labels":["a","b"],"values":[1.0],"colors":["#000"],"cutout_pct":60}"##;
    assert!(serde_json::from_str::<DoughnutChart>(uneven).is_err());

    let zero = r##"{"labels":["a"],"values":[0.0],"colors":["#000"],"cutout_pct":60}"##;
    assert!(serde_json::from_str::<DoughnutChart>(zero).is_err());

    let json = serde_json::to_string(&DoughnutChart::skills()).unwrap();
    let back: DoughnutChart = serde_json::from_str(&json).unwrap();
    assert_eq!(back, DoughnutChart::skills());
    assert_eq!(back.segments().len(), 5);
}
