use super::*;

#[test]
fn accepts_non_decreasing_sequence_ending_at_100() {
    let seq = StepSequence::from_pairs([("A", 30), ("B", 30), ("C", 100)]).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.get(1).unwrap().label, "B");
}

#[test]
fn rejects_empty_backwards_and_unfinished_sequences() {
    assert!(StepSequence::new(vec![]).is_err());
    assert!(StepSequence::from_pairs([("A", 60), ("B", 30), ("C", 100)]).is_err());
    assert!(StepSequence::from_pairs([("A", 30), ("B", 90)]).is_err());
    assert!(Step::new("too far", 101).is_err());
}

#[test]
fn default_sequence_is_valid() {
    let seq = StepSequence::default();
    assert!(StepSequence::new(seq.steps().to_vec()).is_ok());
}

#[test]
fn deserialization_runs_validation() {
    let ok: StepSequence =
        serde_json::from_str(r#"[{"label":"A","target":50},{"label":"B","target":100}]"#).unwrap();
    assert_eq!(ok.len(), 2);

    let err = serde_json::from_str::<StepSequence>(r#"[{"label":"A","target":50}]"#);
    assert!(err.is_err());
}
