use crate::foundation::core::Millis;
use crate::foundation::error::{FolioError, FolioResult};
use rand::Rng;

/// Pointer position normalized to `[0, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Pointer {
    /// Viewport center.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Normalize client coordinates against the viewport size.
    pub fn from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> FolioResult<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(FolioError::validation(format!(
                "viewport must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            x: (client_x / width).clamp(0.0, 1.0),
            y: (client_y / height).clamp(0.0, 1.0),
        })
    }
}

/// Transform applied to a geometric shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeTransform {
    /// Translation in px.
    pub translate: (f64, f64),
    /// Rotation in degrees.
    pub rotate_deg: f64,
}

impl ShapeTransform {
    /// CSS `transform` value.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.translate.0, self.translate.1, self.rotate_deg
        )
    }
}

/// Transform applied to a floating orb.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbTransform {
    /// Translation in px.
    pub translate: (f64, f64),
    /// Uniform scale.
    pub scale: f64,
}

impl OrbTransform {
    /// CSS `transform` value.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate.0, self.translate.1, self.scale
        )
    }
}

/// Mouse-follow motion for the hero background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BackgroundMotion {
    shapes: usize,
    orbs: usize,
}

impl BackgroundMotion {
    /// Interval of the idle drift applied to shapes that never moved.
    pub const DRIFT_INTERVAL: Millis = Millis(3_000);

    /// Motion for `shapes` geometric shapes and `orbs` floating orbs.
    pub fn new(shapes: usize, orbs: usize) -> Self {
        Self { shapes, orbs }
    }

    /// Transforms for every shape; deeper layers move faster.
    pub fn shape_transforms(&self, p: Pointer) -> Vec<ShapeTransform> {
        (0..self.shapes)
            .map(|i| {
                let speed = (i as f64 + 1.0) * 0.5;
                ShapeTransform {
                    translate: ((p.x - 0.5) * speed * 50.0, (p.y - 0.5) * speed * 50.0),
                    rotate_deg: p.x * 360.0,
                }
            })
            .collect()
    }

    /// Transforms for every orb.
    pub fn orb_transforms(&self, p: Pointer) -> Vec<OrbTransform> {
        (0..self.orbs)
            .map(|i| {
                let speed = (i as f64 + 1.0) * 0.3;
                OrbTransform {
                    translate: ((p.x - 0.5) * speed * 30.0, (p.y - 0.5) * speed * 30.0),
                    scale: 1.0 + p.y * 0.2,
                }
            })
            .collect()
    }

    /// Random idle offsets in `[-10, 10)` px, one per shape.
    pub fn drift<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(f64, f64)> {
        (0..self.shapes)
            .map(|_| {
                (
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                )
            })
            .collect()
    }
}

/// Slowly cycling hero gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HueShift {
    hue: u32,
}

impl HueShift {
    /// Tick interval.
    pub const INTERVAL: Millis = Millis(100);

    /// Current hue step in `[0, 360)`.
    pub fn hue(&self) -> u32 {
        self.hue
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.hue = (self.hue + 1) % 360;
    }

    /// State after `elapsed` of ticking from zero.
    pub fn at(elapsed: Millis) -> Self {
        let ticks = elapsed.0 / Self::INTERVAL.0;
        Self {
            hue: (ticks % 360) as u32,
        }
    }

    /// CSS background for the hero.
    pub fn gradient(&self) -> String {
        let h = f64::from(self.hue) * 0.01;
        format!(
            "linear-gradient(135deg, hsl({:.2}, 70%, 65%) 0%, hsl({:.2}, 60%, 55%) 100%)",
            240.0 + h.sin() * 30.0,
            280.0 + h.cos() * 30.0
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/motion.rs"]
mod tests;
