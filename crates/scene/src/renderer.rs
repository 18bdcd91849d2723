use std::collections::BTreeMap;

use serde_json::Value;

use foundation::math::LngLat;

/// A camera movement request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub center: LngLat,
    pub zoom: Option<f64>,
    pub pitch: Option<f64>,
    pub bearing: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    FillExtrusion,
    Line3d,
    Symbol,
}

/// A layer description handed to the renderer exactly once per source
/// lifetime; paint state lives on the renderer side afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub kind: LayerKind,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    StyleNotLoaded,
    UnknownSource(String),
    DuplicateSource(String),
    UnknownLayer(String),
}

impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StyleNotLoaded => write!(f, "style is not loaded yet"),
            Self::UnknownSource(id) => write!(f, "unknown source {id}"),
            Self::DuplicateSource(id) => write!(f, "source {id} already exists"),
            Self::UnknownLayer(id) => write!(f, "unknown layer {id}"),
        }
    }
}

impl std::error::Error for RendererError {}

/// The black-box map renderer seam.
///
/// The engine only describes sources and layers and asks for camera moves;
/// drawing, paint state, and pointer hit-testing live on the other side.
/// Writing sources to an unloaded style is rejected, which is why the
/// synchronizer checks `is_style_loaded` first and defers.
pub trait Renderer {
    fn is_style_loaded(&self) -> bool;
    fn add_source(&mut self, id: &str, data: Value) -> Result<(), RendererError>;
    fn set_source_data(&mut self, id: &str, data: Value) -> Result<(), RendererError>;
    fn add_layer(&mut self, spec: &LayerSpec) -> Result<(), RendererError>;
    fn set_layer_opacity(&mut self, layer_id: &str, opacity: f64) -> Result<(), RendererError>;
    fn fly_to(&mut self, pose: CameraPose);
    fn set_style(&mut self, style_id: &str);
}

/// In-memory renderer double.
///
/// Records the exact source/layer/camera traffic so tests (and headless
/// hosts) can assert on create-vs-patch behavior. `set_style` drops every
/// custom source and layer, mirroring a real basemap style switch.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub style_loaded: bool,
    pub sources: BTreeMap<String, Value>,
    pub layers: BTreeMap<String, LayerSpec>,
    pub patched_sources: Vec<String>,
    pub flights: Vec<CameraPose>,
    pub styles: Vec<String>,
}

impl RecordingRenderer {
    pub fn with_loaded_style() -> Self {
        Self {
            style_loaded: true,
            ..Self::default()
        }
    }
}

impl Renderer for RecordingRenderer {
    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn add_source(&mut self, id: &str, data: Value) -> Result<(), RendererError> {
        if !self.style_loaded {
            return Err(RendererError::StyleNotLoaded);
        }
        if self.sources.contains_key(id) {
            return Err(RendererError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), data);
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: Value) -> Result<(), RendererError> {
        if !self.style_loaded {
            return Err(RendererError::StyleNotLoaded);
        }
        match self.sources.get_mut(id) {
            Some(slot) => {
                *slot = data;
                self.patched_sources.push(id.to_string());
                Ok(())
            }
            None => Err(RendererError::UnknownSource(id.to_string())),
        }
    }

    fn add_layer(&mut self, spec: &LayerSpec) -> Result<(), RendererError> {
        if !self.sources.contains_key(&spec.source) {
            return Err(RendererError::UnknownSource(spec.source.clone()));
        }
        self.layers.insert(spec.id.clone(), spec.clone());
        Ok(())
    }

    fn set_layer_opacity(&mut self, layer_id: &str, opacity: f64) -> Result<(), RendererError> {
        match self.layers.get_mut(layer_id) {
            Some(layer) => {
                layer.opacity = opacity;
                Ok(())
            }
            None => Err(RendererError::UnknownLayer(layer_id.to_string())),
        }
    }

    fn fly_to(&mut self, pose: CameraPose) {
        self.flights.push(pose);
    }

    fn set_style(&mut self, style_id: &str) {
        self.styles.push(style_id.to_string());
        self.sources.clear();
        self.layers.clear();
    }
}
