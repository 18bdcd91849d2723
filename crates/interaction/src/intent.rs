use domain::{EdgeId, EntityId};
use foundation::math::LngLat;

use crate::hover::HoverSummary;

/// Pixel position inside the map viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// An entity under the pointer, as reported by the renderer's hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityHit {
    pub entity_id: EntityId,
    pub position: LngLat,
}

/// What the pointer is over during a hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Entity { entity_id: EntityId },
    Edge { edge_id: EdgeId },
}

/// High-level outcomes the host application reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Single click settled: open the entity's detail popup.
    EntityActivated(EntityHit),
    /// Double click: move the camera to the entity.
    ZoomToEntity(EntityHit),
    /// Click on empty map: clear focus/selection.
    FocusCleared(LngLat),
    /// Position-picking click.
    PositionPicked(LngLat),
    ConnectionTargetPicked {
        source_entity: EntityId,
        target: EntityHit,
    },
    /// Self-loop refused; picking mode stays active.
    ConnectionTargetRejected { entity_id: EntityId },
    QuickEntityClicked {
        hit: EntityHit,
        screen: ScreenPoint,
    },
    QuickMapClicked(LngLat),
    HoverStart(HoverSummary),
    HoverEnd,
}
