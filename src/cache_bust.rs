//! Cache busting for versioned asset links.
//!
//! Rewrites every `styles.css?v=<token>` and `script.js?v=<token>` in an HTML document with
//! fresh random tokens so browsers refetch the assets after a deploy. Everything else in the
//! document is left byte-for-byte untouched.

use crate::foundation::error::{FolioError, FolioResult};
use rand::Rng;
use regex::{NoExpand, Regex};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Length of a generated version token.
pub const VERSION_LEN: usize = 8;

const VERSION_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

static CSS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"styles\.css\?v=([a-z0-9]+)").expect("static css version pattern")
});
static JS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"script\.js\?v=([a-z0-9]+)").expect("static js version pattern")
});

/// What a cache-busting pass changed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BustReport {
    /// File that was rewritten, when busting a file.
    pub path: Option<PathBuf>,
    /// New stylesheet token.
    pub css_version: String,
    /// New script token.
    pub js_version: String,
    /// Number of stylesheet links rewritten.
    pub css_links: usize,
    /// Number of script links rewritten.
    pub js_links: usize,
}

impl BustReport {
    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        match &self.path {
            Some(p) => {
                let _ = writeln!(out, "versions updated in {}", p.display());
            }
            None => out.push_str("versions updated\n"),
        }
        let _ = writeln!(out, "  css: {} ({} link(s))", self.css_version, self.css_links);
        let _ = writeln!(out, "  js:  {} ({} link(s))", self.js_version, self.js_links);
        out.push_str("ready for deployment with cache busting");
        out
    }
}

/// Random `[a-z0-9]` token of [`VERSION_LEN`] characters.
pub fn generate_version<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..VERSION_LEN)
        .map(|_| char::from(VERSION_ALPHABET[rng.random_range(0..VERSION_ALPHABET.len())]))
        .collect()
}

fn fresh_version<R: Rng + ?Sized>(rng: &mut R, taken: &BTreeSet<&str>) -> String {
    loop {
        let v = generate_version(rng);
        if !taken.contains(v.as_str()) {
            return v;
        }
    }
}

fn rewrite(re: &Regex, content: &str, prefix: &str, version: &str) -> (String, usize) {
    let count = re.find_iter(content).count();
    let replacement = format!("{prefix}{version}");
    let out = re.replace_all(content, NoExpand(&replacement)).into_owned();
    (out, count)
}

/// Rewrite both version tokens in `content`. New tokens never equal a token already present.
pub fn bust_versions<R: Rng + ?Sized>(content: &str, rng: &mut R) -> (String, BustReport) {
    let taken: BTreeSet<&str> = CSS_VERSION
        .captures_iter(content)
        .chain(JS_VERSION.captures_iter(content))
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();

    let css_version = fresh_version(rng, &taken);
    let js_version = fresh_version(rng, &taken);

    let (content, css_links) = rewrite(&CSS_VERSION, content, "styles.css?v=", &css_version);
    let (content, js_links) = rewrite(&JS_VERSION, &content, "script.js?v=", &js_version);

    let report = BustReport {
        path: None,
        css_version,
        js_version,
        css_links,
        js_links,
    };
    (content, report)
}

/// Bust `path` in place using a thread-local RNG.
pub fn bust_file(path: &Path) -> FolioResult<BustReport> {
    bust_file_with(path, &mut rand::rng())
}

/// Bust `path` in place using `rng`. Any read or write failure is returned as-is.
#[tracing::instrument(skip(rng))]
pub fn bust_file_with<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> FolioResult<BustReport> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FolioError::io(format!("read '{}'", path.display()), e))?;

    let (rewritten, mut report) = bust_versions(&content, rng);
    if report.css_links == 0 && report.js_links == 0 {
        tracing::warn!("no versioned asset links found");
    }

    std::fs::write(path, rewritten)
        .map_err(|e| FolioError::io(format!("write '{}'", path.display()), e))?;

    tracing::info!(
        css = %report.css_version,
        js = %report.js_version,
        css_links = report.css_links,
        js_links = report.js_links,
        "asset versions updated"
    );
    report.path = Some(path.to_path_buf());
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/cache_bust.rs"]
mod tests;
