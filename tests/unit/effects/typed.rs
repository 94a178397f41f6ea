use super::*;

fn ab() -> TypedText {
    TypedText::new(
        vec!["abc".to_owned(), "xy".to_owned()],
        Millis(10),
        Millis(5),
        Millis(100),
        true,
    )
    .unwrap()
}

#[test]
fn types_holds_and_erases() {
    let t = ab();
    assert_eq!(t.visible_at(Millis(0)), "");
    assert_eq!(t.visible_at(Millis(10)), "a");
    assert_eq!(t.visible_at(Millis(29)), "ab");
    assert_eq!(t.visible_at(Millis(30)), "abc");
    assert_eq!(t.visible_at(Millis(129)), "abc");
    assert_eq!(t.visible_at(Millis(130)), "ab");
    assert_eq!(t.visible_at(Millis(140)), "");
}

#[test]
fn moves_to_next_string_and_loops() {
    let t = ab();
    // "abc" cycle: 30 + 100 + 15
    assert_eq!(t.visible_at(Millis(145 + 20)), "xy");
    assert_eq!(t.loop_len(), Millis(145 + 130));
    assert_eq!(t.visible_at(Millis(275 + 10)), "a");
}

#[test]
fn non_looping_rotation_keeps_last_string() {
    let t = TypedText::new(
        vec!["abc".to_owned(), "xy".to_owned()],
        Millis(10),
        Millis(5),
        Millis(100),
        false,
    )
    .unwrap();
    assert_eq!(t.visible_at(Millis(145 + 125)), "xy");
    assert_eq!(t.visible_at(Millis(10_000)), "xy");
}

#[test]
fn unicode_is_counted_by_char() {
    let t = TypedText::new(vec!["héllo".to_owned()], Millis(1), Millis(1), Millis(0), true)
        .unwrap();
    assert_eq!(t.visible_at(Millis(2)), "hé");
}

#[test]
fn invalid_rotations_are_rejected() {
    assert!(TypedText::new(vec![], Millis(1), Millis(1), Millis(0), true).is_err());
    assert!(TypedText::new(vec!["a".to_owned()], Millis(0), Millis(1), Millis(0), true).is_err());
    assert_eq!(TypedText::hero().strings().len(), 4);
}
