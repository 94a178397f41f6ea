use crate::foundation::error::{FolioError, FolioResult};

/// Exponent of a polynomial easing curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    /// `t^2`.
    Quad,
    /// `t^3`.
    Cubic,
    /// `t^4`.
    Quart,
}

impl Power {
    fn exp(self) -> i32 {
        match self {
            Self::Quad => 2,
            Self::Cubic => 3,
            Self::Quart => 4,
        }
    }
}

/// Easing curve mapping normalized progress to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    Linear,
    /// Polynomial ease-in.
    In(Power),
    /// Polynomial ease-out.
    Out(Power),
    /// Polynomial ease-in/out, symmetric around `t = 0.5`.
    InOut(Power),
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier([f64; 4]),
}

impl Ease {
    /// Quartic ease-out used by the stat counters.
    pub const OUT_QUART: Self = Self::Out(Power::Quart);
    /// CSS `ease`.
    pub const CSS_EASE: Self = Self::CubicBezier([0.25, 0.1, 0.25, 1.0]);
    /// CSS `ease-in`.
    pub const CSS_EASE_IN: Self = Self::CubicBezier([0.42, 0.0, 1.0, 1.0]);
    /// CSS `ease-out`.
    pub const CSS_EASE_OUT: Self = Self::CubicBezier([0.0, 0.0, 0.58, 1.0]);
    /// CSS `ease-in-out`, the reveal animation default.
    pub const CSS_EASE_IN_OUT: Self = Self::CubicBezier([0.42, 0.0, 0.58, 1.0]);
    /// `cubic-bezier(0.4, 0, 0.2, 1)` used by card hovers.
    pub const STANDARD: Self = Self::CubicBezier([0.4, 0.0, 0.2, 1.0]);

    /// Parse a CSS timing keyword or `cubic-bezier(...)` function.
    pub fn from_css(s: &str) -> FolioResult<Self> {
        let s = s.trim();
        match s {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::CSS_EASE),
            "ease-in" => return Ok(Self::CSS_EASE_IN),
            "ease-out" => return Ok(Self::CSS_EASE_OUT),
            "ease-in-out" => return Ok(Self::CSS_EASE_IN_OUT),
            _ => {}
        }
        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| FolioError::validation(format!("unknown timing function '{s}'")))?;
        let nums = args
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FolioError::validation(format!("cubic-bezier argument: {e}")))?;
        let [x1, y1, x2, y2] = nums[..] else {
            return Err(FolioError::validation(format!(
                "cubic-bezier takes 4 arguments, got {}",
                nums.len()
            )));
        };
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(FolioError::validation("cubic-bezier x values must be in [0, 1]"));
        }
        Ok(Self::CubicBezier([x1, y1, x2, y2]))
    }

    /// Apply this curve to `t`, clamped to `[0, 1]`. Endpoints map exactly to 0 and 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::In(p) => t.powi(p.exp()),
            Self::Out(p) => 1.0 - (1.0 - t).powi(p.exp()),
            Self::InOut(p) => {
                let n = p.exp();
                if t < 0.5 {
                    2f64.powi(n - 1) * t.powi(n)
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(n) / 2.0
                }
            }
            Self::CubicBezier([x1, y1, x2, y2]) => {
                let s = solve_bezier_param(t, x1, x2);
                bezier(s, y1, y2)
            }
        }
    }

    /// Interpolate between `from` and `to` at normalized progress `t`.
    pub fn lerp(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

// One axis of a bezier with endpoints fixed at 0 and 1.
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// Find the curve parameter whose x equals `x`: Newton first, bisection if it stalls.
fn solve_bezier_param(x: f64, x1: f64, x2: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < EPS {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier(s, x1, x2);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
