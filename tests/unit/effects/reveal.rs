use super::*;

#[test]
fn sections_reveal_once_at_threshold() {
    let mut obs = RevealObserver::new(SECTION_THRESHOLD).unwrap();
    obs.observe("about");
    obs.observe("skills");

    assert!(!obs.report("about", 0.1));
    assert!(obs.report("about", 0.15));
    assert!(!obs.report("about", 0.9));
    assert!(obs.has_fired("about"));
    assert_eq!(obs.observed_len(), 1);

    obs.observe("about");
    assert_eq!(obs.observed_len(), 1);
}

#[test]
fn unobserved_elements_never_fire() {
    let mut obs = RevealObserver::new(STATS_THRESHOLD).unwrap();
    assert!(!obs.report("hero-stats", 1.0));
    assert!(obs.fired().is_empty());
}

#[test]
fn zero_threshold_still_requires_intersection() {
    let mut obs = RevealObserver::new(0.0).unwrap();
    obs.observe("img");
    assert!(!obs.report("img", 0.0));
    assert!(obs.report("img", 0.01));
}

#[test]
fn threshold_is_validated() {
    assert!(RevealObserver::new(1.5).is_err());
    assert!(RevealObserver::new(-0.1).is_err());
}

#[test]
fn skill_bars_are_staggered() {
    let widths = [95, 90, 85].map(|w| Progress::new(w).unwrap());
    let schedule = skill_bar_schedule(&widths);
    assert_eq!(
        schedule
            .iter()
            .map(|(at, w)| (at.0, w.get()))
            .collect::<Vec<_>>(),
        vec![(0, 95), (200, 90), (400, 85)]
    );
}

#[test]
fn reveal_animation_fades_up() {
    let anim = RevealAnimation::default();
    assert_eq!(anim.frame(Millis::ZERO), (0.0, 100.0));
    assert_eq!(anim.frame(Millis(1_000)), (1.0, 0.0));
    assert_eq!(anim.frame(Millis(5_000)), (1.0, 0.0));

    let (opacity, y) = anim.frame(Millis(500));
    assert!((opacity - 0.5).abs() < 1e-6);
    assert!((y - 50.0).abs() < 1e-4);

    let instant = RevealAnimation::with_css_timing(Millis::ZERO, 20.0, "ease").unwrap();
    assert_eq!(instant.frame(Millis::ZERO), (1.0, 0.0));
    assert!(RevealAnimation::with_css_timing(Millis(300), 0.0, "bounce").is_err());
}
