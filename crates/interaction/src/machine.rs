use foundation::math::LngLat;
use foundation::time::Millis;

use crate::intent::{EntityHit, Intent, ScreenPoint};
use crate::mode::InteractionMode;

/// A raw pointer click from the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Entity under the pointer, if any.
    pub target: Option<EntityHit>,
    pub lng_lat: LngLat,
    pub screen: ScreenPoint,
}

#[derive(Debug, Clone, PartialEq)]
enum ClickState {
    Idle,
    AwaitingDoubleClick { hit: EntityHit, deadline: Millis },
}

/// Disambiguates single vs. double click and routes events by mode.
///
/// One timer resource: the `AwaitingDoubleClick` deadline. Every transition
/// out of that state either fires the pending single click or cancels it;
/// the host pumps `poll(now)` to drive expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickMachine {
    window_ms: f64,
    state: ClickState,
}

impl ClickMachine {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            state: ClickState::Idle,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ClickState::AwaitingDoubleClick { .. })
    }

    /// Routes one click. Intents are emitted in order; at most one pending
    /// single click can be flushed ahead of the click's own intent.
    pub fn on_click(
        &mut self,
        event: ClickEvent,
        mode: &InteractionMode,
        now: Millis,
    ) -> Vec<Intent> {
        let mut intents = Vec::new();

        // A stale pending click settles before this event is interpreted.
        if let Some(intent) = self.poll(now) {
            intents.push(intent);
        }

        // Position picking short-circuits everything, entity hits included.
        if *mode == InteractionMode::PositionPicking {
            intents.push(Intent::PositionPicked(event.lng_lat));
            return intents;
        }

        match event.target {
            Some(hit) => self.on_entity_click(hit, event.screen, mode, now, &mut intents),
            None => {
                intents.push(Intent::FocusCleared(event.lng_lat));
                if *mode == InteractionMode::QuickMap {
                    intents.push(Intent::QuickMapClicked(event.lng_lat));
                }
            }
        }

        intents
    }

    /// Fires the pending single click once its window has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<Intent> {
        match &self.state {
            ClickState::AwaitingDoubleClick { hit, deadline } if now.has_reached(*deadline) => {
                let hit = hit.clone();
                self.state = ClickState::Idle;
                Some(Intent::EntityActivated(hit))
            }
            _ => None,
        }
    }

    /// Drops any pending single click without emitting.
    pub fn cancel(&mut self) {
        self.state = ClickState::Idle;
    }

    fn on_entity_click(
        &mut self,
        hit: EntityHit,
        screen: ScreenPoint,
        mode: &InteractionMode,
        now: Millis,
        intents: &mut Vec<Intent>,
    ) {
        match mode {
            InteractionMode::ConnectionTargetPicking { source_entity } => {
                // Picking modes never leave a timer armed behind them.
                self.cancel();
                if hit.entity_id == *source_entity {
                    log::debug!("connection target {} is the source, rejecting", hit.entity_id);
                    intents.push(Intent::ConnectionTargetRejected {
                        entity_id: hit.entity_id,
                    });
                } else {
                    intents.push(Intent::ConnectionTargetPicked {
                        source_entity: source_entity.clone(),
                        target: hit,
                    });
                }
            }
            InteractionMode::QuickMap => {
                self.cancel();
                intents.push(Intent::QuickEntityClicked { hit, screen });
            }
            InteractionMode::Normal | InteractionMode::PositionPicking => {
                match std::mem::replace(&mut self.state, ClickState::Idle) {
                    ClickState::AwaitingDoubleClick { hit: pending, .. }
                        if pending.entity_id == hit.entity_id =>
                    {
                        intents.push(Intent::ZoomToEntity(hit));
                    }
                    ClickState::AwaitingDoubleClick { hit: pending, .. } => {
                        // A different entity supersedes the pending click:
                        // flush it as the single click it was, then re-arm.
                        intents.push(Intent::EntityActivated(pending));
                        self.arm(hit, now);
                    }
                    ClickState::Idle => self.arm(hit, now),
                }
            }
        }
    }

    fn arm(&mut self, hit: EntityHit, now: Millis) {
        self.state = ClickState::AwaitingDoubleClick {
            hit,
            deadline: now.after(self.window_ms),
        };
    }
}
