use serde::{Deserialize, Serialize};

/// Persisted view preferences.
///
/// Read once at engine startup; written back through a debouncer so
/// mid-drag camera movement never produces a write per frame. Wire field
/// names follow the preferences store payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPrefs {
    #[serde(rename = "basemapStyle")]
    pub basemap_style: String,
    /// `[lng, lat]`.
    #[serde(rename = "cameraCenter")]
    pub camera_center: [f64; 2],
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    #[serde(rename = "opacityPercent")]
    pub opacity_percent: f64,
}

impl Default for ViewPrefs {
    fn default() -> Self {
        Self {
            basemap_style: "streets".to_string(),
            camera_center: [9.19, 45.4642],
            zoom: 11.0,
            pitch: 45.0,
            bearing: 0.0,
            opacity_percent: 100.0,
        }
    }
}
