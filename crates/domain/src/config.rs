use std::collections::BTreeMap;

use serde::Deserialize;

/// Per-kind visual preset: the configured footprint shape and color for
/// entities of one kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KindPreset {
    pub shape: String,
    pub color: String,
}

/// Explicit engine construction parameters.
///
/// Everything the scene and interaction layers could otherwise reach for as
/// ambient globals (style catalog, shape presets, timing constants) lives
/// here and is passed once at engine creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entity kind -> visual preset. Kinds without a preset (or with an
    /// unknown shape name) fall back to a circle in the default color.
    pub kind_presets: BTreeMap<String, KindPreset>,
    pub default_color: String,
    /// Footprint diameter used when the backend omits one (meters).
    pub default_footprint_m: f64,
    /// Horizontal subdivisions per rendered arc.
    pub arc_segments: usize,
    /// Single vs. double click disambiguation window.
    pub double_click_window_ms: f64,
    /// Quiet period before persisting view-state changes.
    pub persist_quiet_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind_presets: BTreeMap::new(),
            default_color: "#8a8a8a".to_string(),
            default_footprint_m: 40.0,
            arc_segments: 32,
            double_click_window_ms: 250.0,
            persist_quiet_ms: 750.0,
        }
    }
}

impl EngineConfig {
    pub fn kind_preset(&self, kind: &str) -> Option<&KindPreset> {
        self.kind_presets.get(kind)
    }
}
