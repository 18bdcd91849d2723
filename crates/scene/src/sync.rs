use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use domain::filters::{visible_edges, visible_entities};
use domain::{Edge, EngineConfig, Entity, RenderFilters, ShapeKind, Snapshot};
use geometry::{
    ArcLane, entity_height, hit_ribbon, layout_edge, parabolic_arc, progress_ring_height,
    ring_polygon, shape_ring, square_ring,
};

use crate::feature::{
    ArcProps, Feature, FeatureGeometry, FootprintProps, HitVolumeProps, ProgressProps, collection,
};
use crate::markers::MarkerStore;
use crate::renderer::{LayerKind, LayerSpec, Renderer, RendererError};
use crate::symbology::{
    ARC_BASE_WIDTH, GENERIC_ARC_COLOR, certainty_style, tag_color, volume_width,
};

pub const SRC_FOOTPRINTS: &str = "entity-footprints";
pub const SRC_PROGRESS: &str = "entity-progress";
pub const SRC_ARCS: &str = "relation-arcs";
pub const SRC_HIT_VOLUMES: &str = "relation-hit-volumes";
pub const SRC_MARKERS: &str = "map-markers";

/// Hit ribbon footprint (meters).
const HIT_RIBBON_WIDTH_M: f64 = 30.0;
const HIT_RIBBON_MARGIN_M: f64 = 15.0;

/// Progress annulus radii relative to the footprint half-size.
const PROGRESS_INNER_FACTOR: f64 = 1.05;
const PROGRESS_OUTER_FACTOR: f64 = 1.25;
const PROGRESS_COLOR: &str = "#2ecc71";

/// What one applied pass did; exclusions here are the recoverable kind.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub entities_rendered: usize,
    pub entities_excluded: usize,
    pub edges_rendered: usize,
    pub edges_excluded: usize,
    pub sources_created: usize,
    pub sources_patched: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied(SyncReport),
    /// The renderer's style is not loaded yet; retry shortly. Nothing was
    /// written and nothing was lost.
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    Renderer(RendererError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Renderer(e) => write!(f, "renderer rejected scene update: {e}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<RendererError> for SyncError {
    fn from(e: RendererError) -> Self {
        Self::Renderer(e)
    }
}

/// Per-pass view state that is not domain data.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Entity the host currently focuses; gates `focused_only` connection
    /// visibility.
    pub focused: Option<String>,
    pub opacity_percent: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            focused: None,
            opacity_percent: 100.0,
        }
    }
}

/// Incremental scene synchronizer.
///
/// Sole owner of "does this renderer source exist yet": the set of created
/// source ids is memoized here, never re-derived from renderer
/// introspection. First pass per source creates source + layer; every later
/// pass patches the source data only, preserving paint/layout state and
/// avoiding flicker. A style reload invalidates every custom source, so
/// `on_style_reload` clears the registry and the next pass recreates.
#[derive(Debug)]
pub struct SceneSync {
    config: EngineConfig,
    created: BTreeSet<String>,
    deferred: bool,
}

impl SceneSync {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            created: BTreeSet::new(),
            deferred: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the last pass was deferred on an unloaded style.
    pub fn needs_retry(&self) -> bool {
        self.deferred
    }

    /// The renderer reported a full style reload: every custom source and
    /// layer is gone. The next pass re-enters the creation path.
    pub fn on_style_reload(&mut self) {
        self.created.clear();
    }

    /// Runs one full render pass.
    ///
    /// Idempotent: the whole visible feature set is recomputed from the
    /// snapshot, so rapid successive passes simply supersede one another.
    pub fn sync<R: Renderer>(
        &mut self,
        renderer: &mut R,
        snapshot: &Snapshot,
        filters: &RenderFilters,
        view: &ViewOptions,
        markers: &MarkerStore,
    ) -> Result<SyncOutcome, SyncError> {
        if !renderer.is_style_loaded() {
            log::debug!("style not loaded, deferring scene sync");
            self.deferred = true;
            return Ok(SyncOutcome::Deferred);
        }
        self.deferred = false;

        let mut report = SyncReport::default();

        let visible = visible_entities(snapshot, filters);
        report.entities_rendered = visible.len();
        report.entities_excluded = snapshot.entities().len() - visible.len();

        let edges = visible_edges(snapshot, &visible, filters, view.focused.as_deref());
        report.edges_rendered = edges.len();
        report.edges_excluded = snapshot.edges().len() - edges.len();

        let opacity = (view.opacity_percent / 100.0).clamp(0.0, 1.0);

        let footprints = footprint_features(&visible, snapshot);
        let progress = progress_features(&visible, snapshot);
        let arcs = arc_features(&edges, &visible, self.config.arc_segments);
        let hits = hit_features(&edges, &visible);

        self.apply(
            renderer,
            SRC_FOOTPRINTS,
            collection(&footprints),
            LayerKind::FillExtrusion,
            opacity,
            &mut report,
        )?;
        self.apply(
            renderer,
            SRC_PROGRESS,
            collection(&progress),
            LayerKind::FillExtrusion,
            opacity,
            &mut report,
        )?;
        self.apply(
            renderer,
            SRC_ARCS,
            collection(&arcs),
            LayerKind::Line3d,
            1.0,
            &mut report,
        )?;
        // Hit volumes are pickable but never visible.
        self.apply(
            renderer,
            SRC_HIT_VOLUMES,
            collection(&hits),
            LayerKind::FillExtrusion,
            0.0,
            &mut report,
        )?;
        self.apply(
            renderer,
            SRC_MARKERS,
            collection(&markers.features()),
            LayerKind::Symbol,
            1.0,
            &mut report,
        )?;

        Ok(SyncOutcome::Applied(report))
    }

    /// Patches the extrusion opacity in place; no source churn.
    pub fn set_opacity<R: Renderer>(
        &mut self,
        renderer: &mut R,
        opacity_percent: f64,
    ) -> Result<(), SyncError> {
        let opacity = (opacity_percent / 100.0).clamp(0.0, 1.0);
        for source in [SRC_FOOTPRINTS, SRC_PROGRESS] {
            if self.created.contains(source) {
                renderer.set_layer_opacity(&layer_id(source), opacity)?;
            }
        }
        Ok(())
    }

    fn apply<R: Renderer>(
        &mut self,
        renderer: &mut R,
        source: &str,
        data: Value,
        kind: LayerKind,
        opacity: f64,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        if self.created.contains(source) {
            renderer.set_source_data(source, data)?;
            report.sources_patched += 1;
        } else {
            renderer.add_source(source, data)?;
            renderer.add_layer(&LayerSpec {
                id: layer_id(source),
                source: source.to_string(),
                kind,
                opacity,
            })?;
            self.created.insert(source.to_string());
            report.sources_created += 1;
        }
        Ok(())
    }
}

pub fn layer_id(source: &str) -> String {
    format!("{source}-layer")
}

fn footprint_features(
    visible: &BTreeMap<&str, &Entity>,
    snapshot: &Snapshot,
) -> Vec<Feature<FootprintProps>> {
    visible
        .values()
        .filter_map(|entity| {
            let center = entity.render_position()?;
            Some(Feature {
                id: entity.id.clone(),
                geometry: FeatureGeometry::Polygon {
                    rings: vec![shape_ring(entity.shape, center, entity.footprint_m)],
                },
                properties: FootprintProps {
                    entity: entity.id.clone(),
                    name: entity.name.clone(),
                    kind: entity.kind.clone(),
                    color: entity.color.clone(),
                    height: entity_height(entity, snapshot.degree(&entity.id)),
                    base: 0.0,
                },
            })
        })
        .collect()
}

fn progress_features(
    visible: &BTreeMap<&str, &Entity>,
    snapshot: &Snapshot,
) -> Vec<Feature<ProgressProps>> {
    visible
        .values()
        .filter_map(|entity| {
            let center = entity.render_position()?;
            let total = entity_height(entity, snapshot.degree(&entity.id));
            let height = progress_ring_height(entity, total);
            if height <= 0.0 {
                return None;
            }
            let half = entity.footprint_m / 2.0;
            let annulus = match entity.shape {
                ShapeKind::Square => square_ring(
                    center,
                    half * PROGRESS_INNER_FACTOR,
                    half * PROGRESS_OUTER_FACTOR,
                ),
                _ => ring_polygon(
                    center,
                    half * PROGRESS_INNER_FACTOR,
                    half * PROGRESS_OUTER_FACTOR,
                ),
            };
            Some(Feature {
                id: format!("{}:progress", entity.id),
                geometry: FeatureGeometry::Polygon {
                    rings: vec![annulus.outer, annulus.inner],
                },
                properties: ProgressProps {
                    entity: entity.id.clone(),
                    color: PROGRESS_COLOR.to_string(),
                    height,
                },
            })
        })
        .collect()
}

fn arc_features(
    edges: &[&Edge],
    visible: &BTreeMap<&str, &Entity>,
    segments: usize,
) -> Vec<Feature<ArcProps>> {
    let mut features = Vec::new();
    for edge in edges {
        // Endpoints resolve through the current pass's entity index, not
        // coordinates cached on the edge.
        let (Some(from), Some(to)) = (
            visible
                .get(edge.from_entity.as_str())
                .and_then(|e| e.render_position()),
            visible
                .get(edge.to_entity.as_str())
                .and_then(|e| e.render_position()),
        ) else {
            continue;
        };

        let style = certainty_style(edge.certainty);
        for slot in layout_edge(edge).slots {
            let (id, color, width) = match &slot.lane {
                ArcLane::Family {
                    family_id,
                    color,
                    volume,
                } => (
                    format!("{}:f:{family_id}", edge.id),
                    color.clone(),
                    volume_width(*volume),
                ),
                ArcLane::Tag { tag } => (
                    format!("{}:t:{tag}", edge.id),
                    tag_color(tag).to_string(),
                    ARC_BASE_WIDTH,
                ),
                ArcLane::Generic => (
                    format!("{}:base", edge.id),
                    GENERIC_ARC_COLOR.to_string(),
                    ARC_BASE_WIDTH,
                ),
            };
            let arc = parabolic_arc(
                from,
                to,
                segments,
                geometry::ARC_PEAK_HEIGHT,
                slot.base_height,
                slot.lateral_offset_m,
            );
            features.push(Feature {
                id,
                geometry: FeatureGeometry::LineString {
                    positions: arc.positions,
                    elevations: arc.elevations,
                },
                properties: ArcProps {
                    edge: edge.id.clone(),
                    color,
                    width,
                    opacity: style.opacity,
                    dash: style.dash,
                },
            });
        }
    }
    features
}

fn hit_features(
    edges: &[&Edge],
    visible: &BTreeMap<&str, &Entity>,
) -> Vec<Feature<HitVolumeProps>> {
    let mut features = Vec::new();
    for edge in edges {
        let (Some(from), Some(to)) = (
            visible
                .get(edge.from_entity.as_str())
                .and_then(|e| e.render_position()),
            visible
                .get(edge.to_entity.as_str())
                .and_then(|e| e.render_position()),
        ) else {
            continue;
        };
        let ring = hit_ribbon(from, to, HIT_RIBBON_WIDTH_M, HIT_RIBBON_MARGIN_M);
        if ring.is_empty() {
            continue;
        }
        features.push(Feature {
            id: edge.id.clone(),
            geometry: FeatureGeometry::Polygon { rings: vec![ring] },
            properties: HitVolumeProps {
                edge: edge.id.clone(),
                height: layout_edge(edge).hit_height,
            },
        });
    }
    features
}

#[cfg(test)]
mod tests {
    use super::{
        SRC_ARCS, SRC_FOOTPRINTS, SRC_HIT_VOLUMES, SceneSync, SyncOutcome, ViewOptions, layer_id,
    };
    use crate::markers::MarkerStore;
    use crate::renderer::{RecordingRenderer, Renderer};
    use domain::{
        Certainty, ConnectionVisibility, Edge, EngineConfig, Entity, FamilyAggregate,
        RenderFilters, ShapeKind, Snapshot,
    };
    use geometry::{ARC_BAND_SPACING, ARC_PEAK_HEIGHT};
    use std::collections::BTreeSet;

    fn entity(id: &str, lng: f64, lat: f64, potential: Option<f64>) -> Entity {
        Entity {
            id: id.to_string(),
            name: id.to_string(),
            kind: "cliente".to_string(),
            categories: Vec::new(),
            lat,
            lng,
            footprint_m: 40.0,
            potential,
            achieved: None,
            shape: ShapeKind::Circle,
            color: "#8a8a8a".to_string(),
        }
    }

    fn ab_snapshot() -> Snapshot {
        let edge = Edge {
            id: "e1".to_string(),
            from_entity: "A".to_string(),
            to_entity: "B".to_string(),
            certainty: Certainty::Certo,
            tags: BTreeSet::from(["commerciale".to_string(), "partner".to_string()]),
            families: vec![FamilyAggregate {
                family_id: "f-1".to_string(),
                name: "Ricambi".to_string(),
                color: "#3355ff".to_string(),
                volume: 820.0,
            }],
        };
        Snapshot::new(
            vec![
                entity("A", 9.19, 45.46, Some(5000.0)),
                entity("B", 9.20, 45.47, None),
            ],
            vec![edge],
        )
    }

    fn run_pass(
        sync: &mut SceneSync,
        renderer: &mut RecordingRenderer,
        snapshot: &Snapshot,
        filters: &RenderFilters,
    ) -> SyncOutcome {
        sync.sync(
            renderer,
            snapshot,
            filters,
            &ViewOptions::default(),
            &MarkerStore::new(),
        )
        .expect("sync")
    }

    #[test]
    fn first_pass_creates_then_patches() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let snapshot = ab_snapshot();
        let filters = RenderFilters::default();

        let SyncOutcome::Applied(first) = run_pass(&mut sync, &mut renderer, &snapshot, &filters)
        else {
            panic!("expected applied pass");
        };
        assert_eq!(first.sources_created, 5);
        assert_eq!(first.sources_patched, 0);
        assert_eq!(renderer.sources.len(), 5);
        assert_eq!(renderer.layers.len(), 5);

        let SyncOutcome::Applied(second) = run_pass(&mut sync, &mut renderer, &snapshot, &filters)
        else {
            panic!("expected applied pass");
        };
        assert_eq!(second.sources_created, 0);
        assert_eq!(second.sources_patched, 5);
        // Layers were not touched by the patch path.
        assert_eq!(renderer.layers.len(), 5);
    }

    #[test]
    fn deferred_until_style_loads() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::default();
        let snapshot = ab_snapshot();
        let filters = RenderFilters::default();

        let outcome = run_pass(&mut sync, &mut renderer, &snapshot, &filters);
        assert_eq!(outcome, SyncOutcome::Deferred);
        assert!(sync.needs_retry());
        assert!(renderer.sources.is_empty());

        renderer.style_loaded = true;
        let outcome = run_pass(&mut sync, &mut renderer, &snapshot, &filters);
        assert!(matches!(outcome, SyncOutcome::Applied(_)));
        assert!(!sync.needs_retry());
    }

    #[test]
    fn style_reload_recreates_sources() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let snapshot = ab_snapshot();
        let filters = RenderFilters::default();

        run_pass(&mut sync, &mut renderer, &snapshot, &filters);
        renderer.set_style("dark");
        sync.on_style_reload();

        let SyncOutcome::Applied(report) = run_pass(&mut sync, &mut renderer, &snapshot, &filters)
        else {
            panic!("expected applied pass");
        };
        assert_eq!(report.sources_created, 5);
        assert_eq!(renderer.sources.len(), 5);
    }

    #[test]
    fn scenario_two_arcs_and_a_tall_hit_volume() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let snapshot = ab_snapshot();
        run_pass(&mut sync, &mut renderer, &snapshot, &RenderFilters::default());

        // Entity A: potential 5000 => height 45.
        let footprints = &renderer.sources[SRC_FOOTPRINTS]["features"];
        let a = footprints
            .as_array()
            .expect("features")
            .iter()
            .find(|f| f["id"] == "A")
            .expect("entity A");
        assert_eq!(a["properties"]["height"], 45.0);

        // One family lane plus one partner band.
        let arcs = renderer.sources[SRC_ARCS]["features"]
            .as_array()
            .expect("arcs");
        assert_eq!(arcs.len(), 2);
        let ids: Vec<&str> = arcs.iter().filter_map(|f| f["id"].as_str()).collect();
        assert!(ids.contains(&"e1:f:f-1"));
        assert!(ids.contains(&"e1:t:partner"));

        let hits = renderer.sources[SRC_HIT_VOLUMES]["features"]
            .as_array()
            .expect("hits");
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0]["properties"]["height"],
            2.0 * (ARC_PEAK_HEIGHT + ARC_BAND_SPACING)
        );
    }

    #[test]
    fn filtered_endpoint_drops_the_edge_and_keeps_a_stable() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let mut snapshot = ab_snapshot();
        // Make B a different kind so a kind filter can hide it.
        {
            let mut entities: Vec<Entity> = snapshot.entities().to_vec();
            entities[1].kind = "fornitore".to_string();
            snapshot = Snapshot::new(entities, snapshot.edges().to_vec());
        }

        run_pass(&mut sync, &mut renderer, &snapshot, &RenderFilters::default());
        let a_before = renderer.sources[SRC_FOOTPRINTS]["features"]
            .as_array()
            .expect("features")
            .iter()
            .find(|f| f["id"] == "A")
            .expect("entity A")
            .clone();

        let mut filters = RenderFilters::default();
        filters.kinds = Some(BTreeSet::from(["cliente".to_string()]));
        run_pass(&mut sync, &mut renderer, &snapshot, &filters);
        assert!(
            renderer.sources[SRC_ARCS]["features"]
                .as_array()
                .expect("arcs")
                .is_empty()
        );

        run_pass(&mut sync, &mut renderer, &snapshot, &RenderFilters::default());
        let arcs = renderer.sources[SRC_ARCS]["features"]
            .as_array()
            .expect("arcs");
        assert_eq!(arcs.len(), 2);
        let a_after = renderer.sources[SRC_FOOTPRINTS]["features"]
            .as_array()
            .expect("features")
            .iter()
            .find(|f| f["id"] == "A")
            .expect("entity A")
            .clone();
        assert_eq!(a_before, a_after);
    }

    #[test]
    fn focused_only_without_focus_renders_no_arcs() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let snapshot = ab_snapshot();
        let mut filters = RenderFilters::default();
        filters.connections = ConnectionVisibility {
            show: true,
            focused_only: true,
        };
        run_pass(&mut sync, &mut renderer, &snapshot, &filters);
        assert!(
            renderer.sources[SRC_ARCS]["features"]
                .as_array()
                .expect("arcs")
                .is_empty()
        );
    }

    #[test]
    fn opacity_patches_in_place() {
        let mut sync = SceneSync::new(EngineConfig::default());
        let mut renderer = RecordingRenderer::with_loaded_style();
        let snapshot = ab_snapshot();
        run_pass(&mut sync, &mut renderer, &snapshot, &RenderFilters::default());

        sync.set_opacity(&mut renderer, 40.0).expect("opacity");
        let layer = &renderer.layers[&layer_id(SRC_FOOTPRINTS)];
        assert_eq!(layer.opacity, 0.4);
        // Patching paint does not count as source traffic.
        assert!(renderer.patched_sources.is_empty());
    }
}
