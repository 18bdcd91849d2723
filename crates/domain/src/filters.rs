use std::collections::{BTreeMap, BTreeSet};

use crate::edge::Edge;
use crate::entity::Entity;
use crate::snapshot::Snapshot;

/// Whether and which connections are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionVisibility {
    /// Master switch: no arcs at all when false.
    pub show: bool,
    /// Restrict to connections touching the focused entity. With no entity
    /// focused this yields an empty connection set, not "all".
    pub focused_only: bool,
}

impl Default for ConnectionVisibility {
    fn default() -> Self {
        Self {
            show: true,
            focused_only: false,
        }
    }
}

/// Filters applied before any geometry is generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFilters {
    /// Entity kinds to keep; `None` keeps all.
    pub kinds: Option<BTreeSet<String>>,
    /// Categories to keep (an entity passes if any of its categories is
    /// listed); `None` keeps all.
    pub categories: Option<BTreeSet<String>>,
    /// Case-insensitive substring match on the entity name.
    pub search: Option<String>,
    pub connections: ConnectionVisibility,
}

impl RenderFilters {
    pub fn entity_passes(&self, entity: &Entity) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&entity.kind) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !entity.categories.iter().any(|c| categories.contains(c)) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty() && !entity.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Entities eligible for rendering this pass, keyed by id.
///
/// Non-finite positions are excluded here; the domain set is untouched.
pub fn visible_entities<'a>(
    snapshot: &'a Snapshot,
    filters: &RenderFilters,
) -> BTreeMap<&'a str, &'a Entity> {
    let mut out = BTreeMap::new();
    for entity in snapshot.entities() {
        if entity.render_position().is_none() {
            log::debug!("entity {} has no finite position, excluded from render set", entity.id);
            continue;
        }
        if !filters.entity_passes(entity) {
            continue;
        }
        out.insert(entity.id.as_str(), entity);
    }
    out
}

/// Edges renderable this pass: both endpoints visible, connection policy
/// honored. Dropped edges reappear as soon as their endpoints do; this is
/// a pure function of the current inputs.
pub fn visible_edges<'a>(
    snapshot: &'a Snapshot,
    visible: &BTreeMap<&str, &Entity>,
    filters: &RenderFilters,
    focused: Option<&str>,
) -> Vec<&'a Edge> {
    if !filters.connections.show {
        return Vec::new();
    }
    if filters.connections.focused_only && focused.is_none() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for edge in snapshot.edges() {
        if let Some(focused) = focused {
            if filters.connections.focused_only && !edge.touches(focused) {
                continue;
            }
        }
        if !visible.contains_key(edge.from_entity.as_str())
            || !visible.contains_key(edge.to_entity.as_str())
        {
            log::debug!("edge {} references a non-visible endpoint, excluded", edge.id);
            continue;
        }
        out.push(edge);
    }
    out
}
