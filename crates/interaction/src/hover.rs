use domain::{Edge, Entity, Snapshot};

use crate::intent::{HoverTarget, Intent};

/// Tooltip content for a hovered entity or edge hit-volume.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverSummary {
    pub target: HoverTarget,
    pub title: String,
    pub lines: Vec<String>,
}

pub fn entity_summary(entity: &Entity, snapshot: &Snapshot) -> HoverSummary {
    let mut lines = vec![entity.kind.clone()];
    if let Some(potential) = entity.potential {
        if potential > 0.0 {
            lines.push(format!("potential {potential:.0}"));
        }
    }
    if let Some(achieved) = entity.achieved {
        if achieved > 0.0 {
            lines.push(format!("achieved {achieved:.0}"));
        }
    }
    let degree = snapshot.degree(&entity.id);
    if degree > 0 {
        lines.push(format!("{degree} connections"));
    }
    HoverSummary {
        target: HoverTarget::Entity {
            entity_id: entity.id.clone(),
        },
        title: entity.name.clone(),
        lines,
    }
}

pub fn edge_summary(edge: &Edge) -> HoverSummary {
    let tags: Vec<&str> = edge.tags.iter().map(String::as_str).collect();
    let title = if tags.is_empty() {
        "relationship".to_string()
    } else {
        tags.join(", ")
    };
    let mut lines = vec![format!("{:?}", edge.certainty).to_lowercase()];
    for family in &edge.families {
        lines.push(format!("{} {:.0}", family.name, family.volume));
    }
    HoverSummary {
        target: HoverTarget::Edge {
            edge_id: edge.id.clone(),
        },
        title,
        lines,
    }
}

/// Tracks the renderer's pointer enter/leave stream.
///
/// Mode-independent: hovering only drives tooltips and never changes the
/// interaction mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverTracker {
    current: Option<HoverTarget>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HoverTarget> {
        self.current.as_ref()
    }

    /// Pointer entered a target. Entering a new target while another is
    /// active closes the old tooltip first.
    pub fn on_enter(&mut self, summary: HoverSummary) -> Vec<Intent> {
        let mut intents = Vec::new();
        if self.current.as_ref() == Some(&summary.target) {
            return intents;
        }
        if self.current.is_some() {
            intents.push(Intent::HoverEnd);
        }
        self.current = Some(summary.target.clone());
        intents.push(Intent::HoverStart(summary));
        intents
    }

    /// Pointer left a target. Leaves for targets that are not current are
    /// ignored (the renderer may deliver them out of order).
    pub fn on_leave(&mut self, target: &HoverTarget) -> Option<Intent> {
        if self.current.as_ref() == Some(target) {
            self.current = None;
            Some(Intent::HoverEnd)
        } else {
            None
        }
    }
}
