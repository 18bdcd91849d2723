use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

pub type EdgeId = String;

/// The one relationship-type tag that carries transaction aggregates.
///
/// Commercial activity renders at the base band (family lanes or a generic
/// arc); it never gets a stacked band of its own.
pub const COMMERCIAL_TAG: &str = "commerciale";

/// How certain the relationship is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Certainty {
    Ipotesi,
    Probabile,
    Certo,
}

/// Per-product-family transaction aggregate attached to an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyAggregate {
    pub family_id: String,
    pub name: String,
    pub color: String,
    pub volume: f64,
}

/// A pairwise link between two entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub from_entity: EntityId,
    pub to_entity: EntityId,
    pub certainty: Certainty,
    /// Relationship-type tags; `BTreeSet` keeps band assignment stable.
    pub tags: BTreeSet<String>,
    pub families: Vec<FamilyAggregate>,
}

impl Edge {
    pub fn has_commercial_tag(&self) -> bool {
        self.tags.contains(COMMERCIAL_TAG)
    }

    /// Non-commercial tags in stable (sorted) order; each receives its own
    /// stacked height band.
    pub fn stacked_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .filter(|t| *t != COMMERCIAL_TAG)
    }

    pub fn touches(&self, entity_id: &str) -> bool {
        self.from_entity == entity_id || self.to_entity == entity_id
    }
}
