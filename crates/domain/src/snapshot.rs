use std::collections::BTreeMap;

use crate::edge::Edge;
use crate::entity::{Entity, EntityId};

/// One immutable view of the domain data.
///
/// Rebuilt wholesale on every host data change (fetch, filter, optimistic
/// update); render passes derive everything from here and keep no authority
/// of their own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entities: Vec<Entity>,
    edges: Vec<Edge>,
    degrees: BTreeMap<EntityId, u32>,
}

impl Snapshot {
    pub fn new(entities: Vec<Entity>, edges: Vec<Edge>) -> Self {
        let mut degrees: BTreeMap<EntityId, u32> = BTreeMap::new();
        for edge in &edges {
            *degrees.entry(edge.from_entity.clone()).or_insert(0) += 1;
            *degrees.entry(edge.to_entity.clone()).or_insert(0) += 1;
        }
        Self {
            entities,
            edges,
            degrees,
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Connection count for an entity (edges touching it, either direction).
    pub fn degree(&self, entity_id: &str) -> u32 {
        self.degrees.get(entity_id).copied().unwrap_or(0)
    }

    /// id -> entity lookup, built once per render pass so edge endpoints
    /// resolve their *current* coordinates in O(1) instead of a linear scan
    /// per edge.
    pub fn entity_index(&self) -> BTreeMap<&str, &Entity> {
        self.entities
            .iter()
            .map(|e| (e.id.as_str(), e))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::edge::{Certainty, Edge};
    use crate::entity::{Entity, ShapeKind};
    use std::collections::BTreeSet;

    fn entity(id: &str) -> Entity {
        Entity {
            id: id.to_string(),
            name: id.to_string(),
            kind: "cliente".to_string(),
            categories: Vec::new(),
            lat: 45.46,
            lng: 9.19,
            footprint_m: 40.0,
            potential: None,
            achieved: None,
            shape: ShapeKind::Circle,
            color: "#8a8a8a".to_string(),
        }
    }

    fn edge(id: &str, from: &str, to: &str) -> Edge {
        Edge {
            id: id.to_string(),
            from_entity: from.to_string(),
            to_entity: to.to_string(),
            certainty: Certainty::Certo,
            tags: BTreeSet::new(),
            families: Vec::new(),
        }
    }

    #[test]
    fn degrees_count_both_directions() {
        let snap = Snapshot::new(
            vec![entity("a"), entity("b"), entity("c")],
            vec![edge("e1", "a", "b"), edge("e2", "c", "a")],
        );
        assert_eq!(snap.degree("a"), 2);
        assert_eq!(snap.degree("b"), 1);
        assert_eq!(snap.degree("c"), 1);
        assert_eq!(snap.degree("missing"), 0);
    }

    #[test]
    fn entity_index_resolves_by_id() {
        let snap = Snapshot::new(vec![entity("a"), entity("b")], Vec::new());
        let index = snap.entity_index();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("b").map(|e| e.id.as_str()), Some("b"));
    }
}
