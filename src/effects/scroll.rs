/// Header switches to its scrolled style beyond this offset (px).
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
/// The scroll-to-top button appears beyond this offset (px).
pub const SCROLL_TOP_THRESHOLD: f64 = 300.0;
/// Fixed header height subtracted from anchor targets (px).
pub const HEADER_OFFSET: f64 = 80.0;
/// Hero translation per scrolled pixel.
pub const PARALLAX_RATE: f64 = -0.1;

/// Header background and shadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HeaderStyle {
    /// CSS background.
    pub background: &'static str,
    /// CSS box-shadow.
    pub box_shadow: &'static str,
}

impl HeaderStyle {
    /// Style at the top of the page.
    pub const RESTING: Self = Self {
        background: "rgba(255, 255, 255, 0.95)",
        box_shadow: "none",
    };
    /// Style once the page is scrolled.
    pub const SCROLLED: Self = Self {
        background: "rgba(255, 255, 255, 0.98)",
        box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
    };
}

/// Everything the scroll handlers derive from one scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Header style.
    pub header: HeaderStyle,
    /// Hero parallax translation in px.
    pub hero_translate_y: f64,
    /// Whether the scroll-to-top button is shown.
    pub scroll_top_visible: bool,
}

impl ScrollState {
    /// Derive the state for vertical offset `scroll_y`.
    pub fn at(scroll_y: f64) -> Self {
        let scroll_y = scroll_y.max(0.0);
        Self {
            header: if scroll_y > HEADER_SCROLL_THRESHOLD {
                HeaderStyle::SCROLLED
            } else {
                HeaderStyle::RESTING
            },
            hero_translate_y: scroll_y * PARALLAX_RATE,
            scroll_top_visible: scroll_y > SCROLL_TOP_THRESHOLD,
        }
    }

    /// CSS `transform` for the hero.
    pub fn hero_transform(&self) -> String {
        format!("translateY({}px)", self.hero_translate_y)
    }
}

/// Scroll position for an in-page anchor whose element sits at `offset_top`.
pub fn anchor_scroll_target(offset_top: f64) -> f64 {
    (offset_top - HEADER_OFFSET).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scroll.rs"]
mod tests;
