use super::*;

#[test]
fn flags_start_false_and_flip_once() {
    let mut set = ReadinessSet::new(["animation-library", "fonts"]).unwrap();
    assert!(!set.is_satisfied());
    assert_eq!(set.pending(), vec!["animation-library", "fonts"]);

    assert!(set.mark_ready("fonts").unwrap());
    assert!(!set.mark_ready("fonts").unwrap());
    assert_eq!(set.is_ready("fonts"), Some(true));
    assert_eq!(set.is_ready("chart-library"), None);

    set.mark_ready("animation-library").unwrap();
    assert!(set.is_satisfied());
    assert!(set.pending().is_empty());
}

#[test]
fn unknown_names_are_rejected() {
    let mut set = ReadinessSet::new(["fonts"]).unwrap();
    assert!(set.mark_ready("jquery").is_err());
    assert_eq!(set.is_ready("fonts"), Some(false));
}

#[test]
fn duplicates_and_blank_names_are_rejected() {
    assert!(ReadinessSet::new(["fonts", "fonts"]).is_err());
    assert!(ReadinessSet::new(["  "]).is_err());
}

#[test]
fn empty_set_is_satisfied() {
    let set = ReadinessSet::new(Vec::<String>::new()).unwrap();
    assert!(set.is_empty());
    assert!(set.is_satisfied());
}
