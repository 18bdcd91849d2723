//! Wire records as the backend emits them.
//!
//! Field names follow the backend payload verbatim; conversion into domain
//! types happens here, at the edge of the engine. Records with missing
//! coordinates become entities with non-finite positions, so they stay in
//! the domain set and are excluded from rendering downstream.

use serde::Deserialize;

use crate::config::EngineConfig;
use crate::edge::{Certainty, Edge, FamilyAggregate};
use crate::entity::{Entity, ShapeKind};

#[derive(Debug, Clone, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub nome: String,
    pub tipo: String,
    #[serde(default)]
    pub categorie: Vec<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub dimensione: Option<f64>,
    #[serde(default)]
    pub potenziale: Option<f64>,
    #[serde(default)]
    pub venduto_totale: Option<f64>,
}

impl EntityRecord {
    pub fn into_entity(self, config: &EngineConfig) -> Entity {
        let preset = config.kind_preset(&self.tipo);
        // Unknown or unconfigured shapes default to a circle here, before
        // any geometry runs.
        let shape = preset
            .and_then(|p| ShapeKind::parse(&p.shape))
            .unwrap_or(ShapeKind::Circle);
        let color = preset
            .map(|p| p.color.clone())
            .unwrap_or_else(|| config.default_color.clone());
        Entity {
            id: self.id,
            name: self.nome,
            kind: self.tipo,
            categories: self.categorie,
            lat: self.lat.unwrap_or(f64::NAN),
            lng: self.lng.unwrap_or(f64::NAN),
            footprint_m: self.dimensione.unwrap_or(config.default_footprint_m),
            potential: self.potenziale,
            achieved: self.venduto_totale,
            shape,
            color,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyRecord {
    pub famiglia_id: String,
    pub famiglia_nome: String,
    pub famiglia_colore: String,
    #[serde(default)]
    pub volume: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    pub neurone_da: String,
    pub neurone_a: String,
    #[serde(default)]
    pub tipo_connessione: Vec<String>,
    pub certezza: Certainty,
    #[serde(default)]
    pub famiglie_transazioni: Vec<FamilyRecord>,
}

impl EdgeRecord {
    pub fn into_edge(self) -> Edge {
        Edge {
            id: self.id,
            from_entity: self.neurone_da,
            to_entity: self.neurone_a,
            certainty: self.certezza,
            tags: self.tipo_connessione.into_iter().collect(),
            families: self
                .famiglie_transazioni
                .into_iter()
                .map(|f| FamilyAggregate {
                    family_id: f.famiglia_id,
                    name: f.famiglia_nome,
                    color: f.famiglia_colore,
                    volume: f.volume,
                })
                .collect(),
        }
    }
}
