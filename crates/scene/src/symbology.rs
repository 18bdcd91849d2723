use serde::Serialize;

use domain::Certainty;

/// Line dash presets the renderer understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashPattern {
    Solid,
    Dashed,
    Dotted,
}

/// Visual weight of a certainty level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStyle {
    pub opacity: f64,
    pub dash: DashPattern,
}

pub fn certainty_style(certainty: Certainty) -> ArcStyle {
    match certainty {
        Certainty::Certo => ArcStyle {
            opacity: 1.0,
            dash: DashPattern::Solid,
        },
        Certainty::Probabile => ArcStyle {
            opacity: 0.75,
            dash: DashPattern::Dashed,
        },
        Certainty::Ipotesi => ArcStyle {
            opacity: 0.45,
            dash: DashPattern::Dotted,
        },
    }
}

pub const DEFAULT_TAG_COLOR: &str = "#8c97a3";
pub const GENERIC_ARC_COLOR: &str = "#6f7a85";

/// Color for a stacked relationship-type tag band.
pub fn tag_color(tag: &str) -> &'static str {
    match tag {
        "partner" => "#7b5cd6",
        "fornitore" => "#2e8b57",
        "concorrente" => "#c0392b",
        "istituzionale" => "#2980b9",
        _ => DEFAULT_TAG_COLOR,
    }
}

/// Base width of tag and generic arcs.
pub const ARC_BASE_WIDTH: f64 = 3.0;

/// Family-lane arc width grows sub-linearly with transaction volume so
/// lanes stay readable across volume magnitudes.
pub fn volume_width(volume: f64) -> f64 {
    (2.0 + (1.0 + volume.max(0.0)).ln() * 0.8).clamp(2.0, 10.0)
}
