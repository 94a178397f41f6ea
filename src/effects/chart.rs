use crate::foundation::error::{FolioError, FolioResult};
use serde_json::json;

/// One arc of a doughnut chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArcSegment {
    /// Legend label.
    pub label: String,
    /// Fill color.
    pub color: String,
    /// Fraction of the full circle in `[0, 1]`.
    pub share: f64,
    /// Start angle in degrees, clockwise from 12 o'clock.
    pub start_deg: f64,
    /// End angle in degrees.
    pub end_deg: f64,
}

/// Labelled doughnut chart dataset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawDoughnutChart")]
pub struct DoughnutChart {
    labels: Vec<String>,
    values: Vec<f64>,
    colors: Vec<String>,
    cutout_pct: u8,
}

impl DoughnutChart {
    /// Validate and build a chart.
    pub fn new(
        labels: Vec<String>,
        values: Vec<f64>,
        colors: Vec<String>,
        cutout_pct: u8,
    ) -> FolioResult<Self> {
        if labels.is_empty() {
            return Err(FolioError::validation("chart needs at least one value"));
        }
        if labels.len() != values.len() || labels.len() != colors.len() {
            return Err(FolioError::validation(format!(
                "chart lengths differ: {} labels, {} values, {} colors",
                labels.len(),
                values.len(),
                colors.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(FolioError::validation(format!(
                "chart values must be finite and >= 0, got {bad}"
            )));
        }
        if values.iter().sum::<f64>() <= 0.0 {
            return Err(FolioError::validation("chart values sum to zero"));
        }
        if cutout_pct >= 100 {
            return Err(FolioError::validation("chart cutout must be < 100%"));
        }
        Ok(Self {
            labels,
            values,
            colors,
            cutout_pct,
        })
    }

    /// The portfolio's skills breakdown.
    pub fn skills() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
        Self {
            labels: owned(&[
                "Product Management",
                "Data Analysis",
                "Digital Transformation",
                "Process Optimization",
                "Technical Skills",
            ]),
            values: vec![95.0, 90.0, 85.0, 92.0, 80.0],
            colors: owned(&["#667eea", "#764ba2", "#48bb78", "#ed8936", "#38b2ac"]),
            cutout_pct: 60,
        }
    }

    /// Arc segments laid out clockwise; the last segment always ends at 360°.
    pub fn segments(&self) -> Vec<ArcSegment> {
        let total: f64 = self.values.iter().sum();
        let Some(last) = self.values.len().checked_sub(1) else {
            return Vec::new();
        };
        if total <= 0.0 {
            return Vec::new();
        }
        let mut start = 0.0;
        self.labels
            .iter()
            .zip(&self.values)
            .zip(&self.colors)
            .enumerate()
            .map(|(i, ((label, value), color))| {
                let share = value / total;
                let end = if i == last { 360.0 } else { start + share * 360.0 };
                let seg = ArcSegment {
                    label: label.clone(),
                    color: color.clone(),
                    share,
                    start_deg: start,
                    end_deg: end,
                };
                start = end;
                seg
            })
            .collect()
    }

    /// Chart.js-compatible configuration.
    pub fn to_config_json(&self) -> serde_json::Value {
        json!({
            "type": "doughnut",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "data": self.values,
                    "backgroundColor": self.colors,
                    "borderWidth": 0,
                    "cutout": format!("{}%", self.cutout_pct),
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": {
                        "position": "bottom",
                        "labels": { "padding": 20, "usePointStyle": true, "font": { "size": 12 } }
                    }
                },
                "animation": { "animateRotate": true, "duration": 2000 }
            }
        })
    }
}

#[derive(serde::Deserialize)]
struct RawDoughnutChart {
    labels: Vec<String>,
    values: Vec<f64>,
    colors: Vec<String>,
    cutout_pct: u8,
}

impl TryFrom<RawDoughnutChart> for DoughnutChart {
    type Error = FolioError;

    fn try_from(raw: RawDoughnutChart) -> Result<Self, Self::Error> {
        Self::new(raw.labels, raw.values, raw.colors, raw.cutout_pct)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chart.rs"]
mod tests;
