use crate::animation::ease::Ease;
use crate::foundation::core::Millis;

/// A stat text split into its numeric value and decorative suffix.
#[derive(Clone, Debug, PartialEq)]
pub struct StatValue {
    /// Parsed number.
    pub value: f64,
    /// Every non-numeric character, in order (`"+"`, `"%"`, ...).
    pub suffix: String,
}

/// Split `"150+"` into `150` and `"+"`. Returns `None` when the text holds no number.
pub fn parse_stat(text: &str) -> Option<StatValue> {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let suffix: String = text
        .chars()
        .filter(|c| !(c.is_ascii_digit() || *c == '.'))
        .collect();
    if numeric.is_empty() {
        return None;
    }
    let value = numeric.parse::<f64>().ok()?;
    Some(StatValue { value, suffix })
}

/// Count-up animation for a hero stat.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CounterAnimation {
    start: f64,
    end: f64,
    suffix: String,
    duration: Millis,
    ease: Ease,
}

impl CounterAnimation {
    /// Default count-up duration.
    pub const DEFAULT_DURATION: Millis = Millis(2_000);

    /// Count from zero to `end`.
    pub fn new(end: f64, suffix: impl Into<String>, duration: Millis) -> Self {
        Self {
            start: 0.0,
            end,
            suffix: suffix.into(),
            duration,
            ease: Ease::OUT_QUART,
        }
    }

    /// Build from the element's initial text, or `None` when it has no number.
    pub fn from_text(text: &str, duration: Millis) -> Option<Self> {
        let stat = parse_stat(text)?;
        Some(Self::new(stat.value, stat.suffix, duration))
    }

    /// Target value.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Return `true` once `elapsed` covers the full duration.
    pub fn is_complete(&self, elapsed: Millis) -> bool {
        elapsed >= self.duration
    }

    /// Text displayed `elapsed` after the animation started.
    pub fn sample(&self, elapsed: Millis) -> String {
        if self.is_complete(elapsed) {
            return format!("{}{}", format_grouped(self.end), self.suffix);
        }
        let t = elapsed.0 as f64 / self.duration.0 as f64;
        let current = self.ease.lerp(self.start, self.end, t);
        if self.end < 100.0 {
            format!("{current:.1}{}", self.suffix)
        } else {
            format!(
                "{}{}",
                group_thousands(current.floor().max(0.0) as u64),
                self.suffix
            )
        }
    }
}

/// Group the integer part with `,` and keep at most three significant decimals.
pub fn format_grouped(value: f64) -> String {
    let value = value.max(0.0);
    let rounded = (value * 1000.0).round() / 1000.0;
    let int = rounded.trunc() as u64;
    let frac = format!("{:.3}", rounded.fract());
    let frac = frac.trim_start_matches('0').trim_end_matches('0');
    let frac = if frac == "." { "" } else { frac };
    format!("{}{}", group_thousands(int), frac)
}

/// `1500` → `"1,500"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/counter.rs"]
mod tests;
