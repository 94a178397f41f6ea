use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <link rel="stylesheet" href="styles.css?v=abc12345">
</head>
<body>
  <script src="script.js?v=xyz98765"></script>
</body>
</html>
"#;

fn is_token(s: &str) -> bool {
    s.len() == VERSION_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

#[test]
fn generated_versions_are_8_lowercase_alphanumerics() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        assert!(is_token(&generate_version(&mut rng)));
    }
}

#[test]
fn both_tokens_change_and_nothing_else_does() {
    let mut rng = StdRng::seed_from_u64(42);
    let (out, report) = bust_versions(PAGE, &mut rng);

    assert!(is_token(&report.css_version));
    assert!(is_token(&report.js_version));
    assert_ne!(report.css_version, "abc12345");
    assert_ne!(report.js_version, "xyz98765");
    assert_eq!((report.css_links, report.js_links), (1, 1));

    let expected = PAGE
        .replace("abc12345", &report.css_version)
        .replace("xyz98765", &report.js_version);
    assert_eq!(out, expected);
}

#[test]
fn pattern_still_matches_after_each_run() {
    let mut rng = StdRng::seed_from_u64(3);
    let (once, first) = bust_versions(PAGE, &mut rng);
    let (twice, second) = bust_versions(&once, &mut rng);

    assert_eq!((second.css_links, second.js_links), (1, 1));
    assert_ne!(first.css_version, second.css_version);
    assert_eq!(once.len(), twice.len());
}

#[test]
fn every_occurrence_shares_one_token() {
    let page = "a styles.css?v=1 b styles.css?v=2 c script.js?v=q";
    let mut rng = StdRng::seed_from_u64(9);
    let (out, report) = bust_versions(page, &mut rng);
    assert_eq!(report.css_links, 2);
    assert_eq!(
        out,
        format!(
            "a styles.css?v={css} b styles.css?v={css} c script.js?v={js}",
            css = report.css_version,
            js = report.js_version
        )
    );
}

#[test]
fn content_without_links_is_unchanged() {
    let page = "<p>styles.css without version, script.js?v=UPPER</p>";
    let mut rng = StdRng::seed_from_u64(5);
    let (out, report) = bust_versions(page, &mut rng);
    assert_eq!(out, page);
    assert_eq!((report.css_links, report.js_links), (0, 0));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = bust_file(Path::new("target/does-not-exist/index.html")).unwrap_err();
    assert!(matches!(
        &err,
        FolioError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
    ));
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn summary_names_both_versions() {
    let report = BustReport {
        path: Some(PathBuf::from("index.html")),
        css_version: "aaaaaaaa".to_owned(),
        js_version: "bbbbbbbb".to_owned(),
        css_links: 1,
        js_links: 2,
    };
    let text = report.summary();
    assert!(text.contains("index.html"));
    assert!(text.contains("css: aaaaaaaa (1 link(s))"));
    assert!(text.contains("js:  bbbbbbbb (2 link(s))"));
}
