use super::*;

#[test]
fn thresholds_are_exclusive() {
    let top = ScrollState::at(50.0);
    assert_eq!(top.header, HeaderStyle::RESTING);
    assert!(!top.scroll_top_visible);

    let below = ScrollState::at(51.0);
    assert_eq!(below.header, HeaderStyle::SCROLLED);
    assert!(!below.scroll_top_visible);

    assert!(!ScrollState::at(300.0).scroll_top_visible);
    assert!(ScrollState::at(301.0).scroll_top_visible);
}

#[test]
fn parallax_moves_hero_up() {
    let s = ScrollState::at(400.0);
    assert_eq!(s.hero_translate_y, -40.0);
    assert_eq!(s.hero_transform(), "translateY(-40px)");
    assert_eq!(ScrollState::at(-20.0).hero_translate_y, 0.0);
}

#[test]
fn anchors_account_for_fixed_header() {
    assert_eq!(anchor_scroll_target(1_000.0), 920.0);
    assert_eq!(anchor_scroll_target(40.0), 0.0);
}
