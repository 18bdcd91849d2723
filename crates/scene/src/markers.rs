use std::collections::BTreeMap;

use foundation::math::LngLat;

use crate::feature::{Feature, FeatureGeometry, MarkerProps};

/// A labeled marker placed by the external command layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: LngLat,
    pub label: String,
    pub color: String,
}

/// Store for externally placed markers.
///
/// Placing with an existing id replaces the marker; the next sync pass
/// patches the marker source like any other group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerStore {
    markers: BTreeMap<String, Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, marker: Marker) {
        self.markers.insert(marker.id.clone(), marker);
    }

    /// Returns `true` if a marker was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.markers.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn features(&self) -> Vec<Feature<MarkerProps>> {
        self.markers
            .values()
            .map(|m| Feature {
                id: m.id.clone(),
                geometry: FeatureGeometry::Point {
                    position: m.position,
                },
                properties: MarkerProps {
                    label: m.label.clone(),
                    color: m.color.clone(),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, MarkerStore};
    use foundation::math::LngLat;

    fn marker(id: &str) -> Marker {
        Marker {
            id: id.to_string(),
            position: LngLat::new(9.19, 45.46),
            label: id.to_string(),
            color: "#ff0000".to_string(),
        }
    }

    #[test]
    fn place_replace_remove() {
        let mut store = MarkerStore::new();
        store.place(marker("m-1"));
        store.place(marker("m-2"));
        assert_eq!(store.len(), 2);

        let mut replacement = marker("m-1");
        replacement.label = "moved".to_string();
        store.place(replacement);
        assert_eq!(store.len(), 2);

        assert!(store.remove("m-2"));
        assert!(!store.remove("m-2"));
        assert_eq!(store.len(), 1);

        let features = store.features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].properties.label, "moved");
    }
}
