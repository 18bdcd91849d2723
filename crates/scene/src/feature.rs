//! GeoJSON-shaped render features.
//!
//! Features are derived and ephemeral: regenerated on every pass, never
//! authoritative. Only the feature `id` survives across passes: it is a
//! stable function of the domain id so the renderer can diff cheaply.

use serde::Serialize;
use serde_json::{Value, json};

use foundation::math::LngLat;

use crate::symbology::DashPattern;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Point {
        position: LngLat,
    },
    /// Rings as closed rings; any ring after the first is a hole.
    Polygon {
        rings: Vec<Vec<LngLat>>,
    },
    /// 3D line: one elevation per position.
    LineString {
        positions: Vec<LngLat>,
        elevations: Vec<f64>,
    },
}

impl FeatureGeometry {
    fn to_value(&self) -> Value {
        match self {
            Self::Point { position } => json!({
                "type": "Point",
                "coordinates": [position.lng, position.lat],
            }),
            Self::Polygon { rings } => json!({
                "type": "Polygon",
                "coordinates": rings
                    .iter()
                    .map(|ring| ring.iter().map(|p| vec![p.lng, p.lat]).collect::<Vec<_>>())
                    .collect::<Vec<_>>(),
            }),
            Self::LineString {
                positions,
                elevations,
            } => json!({
                "type": "LineString",
                "coordinates": positions
                    .iter()
                    .zip(elevations.iter())
                    .map(|(p, e)| vec![p.lng, p.lat, *e])
                    .collect::<Vec<_>>(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature<P> {
    pub id: String,
    pub geometry: FeatureGeometry,
    pub properties: P,
}

impl<P: Serialize> Feature<P> {
    pub fn to_value(&self) -> Value {
        json!({
            "type": "Feature",
            "id": self.id,
            "geometry": self.geometry.to_value(),
            "properties": self.properties,
        })
    }
}

/// Serializes a feature collection for the renderer boundary.
pub fn collection<P: Serialize>(features: &[Feature<P>]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features.iter().map(Feature::to_value).collect::<Vec<_>>(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintProps {
    pub entity: String,
    pub name: String,
    pub kind: String,
    pub color: String,
    pub height: f64,
    pub base: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressProps {
    pub entity: String,
    pub color: String,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcProps {
    pub edge: String,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub dash: DashPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitVolumeProps {
    pub edge: String,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerProps {
    pub label: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::{Feature, FeatureGeometry, MarkerProps, collection};
    use foundation::math::LngLat;

    #[test]
    fn point_feature_serializes_as_geojson() {
        let feature = Feature {
            id: "m-1".to_string(),
            geometry: FeatureGeometry::Point {
                position: LngLat::new(9.19, 45.46),
            },
            properties: MarkerProps {
                label: "HQ".to_string(),
                color: "#ff0000".to_string(),
            },
        };
        let value = collection(&[feature]);
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["id"], "m-1");
        assert_eq!(value["features"][0]["geometry"]["type"], "Point");
        assert_eq!(value["features"][0]["properties"]["label"], "HQ");
    }

    #[test]
    fn line_string_carries_elevations_as_third_coordinate() {
        let feature = Feature {
            id: "a-1".to_string(),
            geometry: FeatureGeometry::LineString {
                positions: vec![LngLat::new(9.0, 45.0), LngLat::new(9.1, 45.1)],
                elevations: vec![0.0, 120.0],
            },
            properties: serde_json::json!({}),
        };
        let value = feature.to_value();
        assert_eq!(value["geometry"]["coordinates"][1][2], 120.0);
    }
}
