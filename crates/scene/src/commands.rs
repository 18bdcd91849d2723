use serde::Deserialize;

use foundation::math::LngLat;

use crate::markers::{Marker, MarkerStore};
use crate::renderer::{CameraPose, Renderer};
use crate::sync::SceneSync;

/// One command from the external automation layer.
///
/// All parts are optional; a command may carry several at once. Wire field
/// names follow the issuing protocol.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExternalCommand {
    #[serde(rename = "flyTo")]
    pub fly_to: Option<FlyToCommand>,
    #[serde(rename = "setStyle")]
    pub set_style: Option<String>,
    #[serde(rename = "placeMarker")]
    pub place_marker: Option<PlaceMarkerCommand>,
    #[serde(rename = "removeMarker")]
    pub remove_marker: Option<RemoveMarkerCommand>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlyToCommand {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub zoom: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
    #[serde(default)]
    pub bearing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceMarkerCommand {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    #[serde(default = "default_marker_color")]
    pub color: String,
}

fn default_marker_color() -> String {
    "#e74c3c".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoveMarkerCommand {
    pub id: String,
}

/// What a command application actually did.
///
/// Returned so the issuing layer can sequence further commands once this
/// one completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandAck {
    pub flew: bool,
    pub style_set: bool,
    pub marker_placed: bool,
    pub marker_removed: bool,
}

/// Applies a command to the renderer and marker store.
///
/// `setStyle` implies a full style reload, so source creation is re-armed;
/// marker changes become visible on the next sync pass.
pub fn apply_command<R: Renderer>(
    command: &ExternalCommand,
    renderer: &mut R,
    sync: &mut SceneSync,
    markers: &mut MarkerStore,
) -> CommandAck {
    let mut ack = CommandAck::default();

    if let Some(fly) = &command.fly_to {
        renderer.fly_to(CameraPose {
            center: LngLat::new(fly.lng, fly.lat),
            zoom: fly.zoom,
            pitch: fly.pitch,
            bearing: fly.bearing,
        });
        ack.flew = true;
    }

    if let Some(style) = &command.set_style {
        renderer.set_style(style);
        sync.on_style_reload();
        ack.style_set = true;
    }

    if let Some(place) = &command.place_marker {
        markers.place(Marker {
            id: place.id.clone(),
            position: LngLat::new(place.lng, place.lat),
            label: place.label.clone(),
            color: place.color.clone(),
        });
        ack.marker_placed = true;
    }

    if let Some(remove) = &command.remove_marker {
        ack.marker_removed = markers.remove(&remove.id);
    }

    ack
}

#[cfg(test)]
mod tests {
    use super::{ExternalCommand, apply_command};
    use crate::markers::MarkerStore;
    use crate::renderer::RecordingRenderer;
    use crate::sync::{SceneSync, SyncOutcome, ViewOptions};
    use domain::{EngineConfig, RenderFilters, Snapshot};

    #[test]
    fn fly_to_command_moves_the_camera() {
        let command: ExternalCommand = serde_json::from_str(
            r#"{"flyTo": {"lat": 45.46, "lng": 9.19, "zoom": 14.0}}"#,
        )
        .expect("command");
        let mut renderer = RecordingRenderer::with_loaded_style();
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut markers = MarkerStore::new();

        let ack = apply_command(&command, &mut renderer, &mut sync, &mut markers);
        assert!(ack.flew);
        assert!(!ack.style_set);
        assert_eq!(renderer.flights.len(), 1);
        assert_eq!(renderer.flights[0].zoom, Some(14.0));
        assert_eq!(renderer.flights[0].center.lng, 9.19);
    }

    #[test]
    fn set_style_rearms_source_creation() {
        let mut renderer = RecordingRenderer::with_loaded_style();
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut markers = MarkerStore::new();
        let snapshot = Snapshot::default();

        sync.sync(
            &mut renderer,
            &snapshot,
            &RenderFilters::default(),
            &ViewOptions::default(),
            &markers,
        )
        .expect("first pass");

        let command: ExternalCommand =
            serde_json::from_str(r#"{"setStyle": "dark"}"#).expect("command");
        let ack = apply_command(&command, &mut renderer, &mut sync, &mut markers);
        assert!(ack.style_set);
        assert_eq!(renderer.styles, vec!["dark".to_string()]);

        let outcome = sync
            .sync(
                &mut renderer,
                &snapshot,
                &RenderFilters::default(),
                &ViewOptions::default(),
                &markers,
            )
            .expect("pass after style switch");
        let SyncOutcome::Applied(report) = outcome else {
            panic!("expected applied pass");
        };
        assert_eq!(report.sources_created, 5);
    }

    #[test]
    fn marker_lifecycle_through_commands() {
        let mut renderer = RecordingRenderer::with_loaded_style();
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut markers = MarkerStore::new();

        let place: ExternalCommand = serde_json::from_str(
            r#"{"placeMarker": {"id": "m-1", "lat": 45.46, "lng": 9.19, "label": "Qui"}}"#,
        )
        .expect("command");
        let ack = apply_command(&place, &mut renderer, &mut sync, &mut markers);
        assert!(ack.marker_placed);
        assert_eq!(markers.len(), 1);

        let remove: ExternalCommand =
            serde_json::from_str(r#"{"removeMarker": {"id": "m-1"}}"#).expect("command");
        let ack = apply_command(&remove, &mut renderer, &mut sync, &mut markers);
        assert!(ack.marker_removed);
        assert!(markers.is_empty());

        // Removing again is a no-op, reported as such.
        let ack = apply_command(&remove, &mut renderer, &mut sync, &mut markers);
        assert!(!ack.marker_removed);
    }
}
