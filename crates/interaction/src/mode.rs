use domain::EntityId;

/// Mutually exclusive interaction modes.
///
/// Exactly one is active at a time; switching is driven by the host
/// application, never by the engine. The click machine reads the active
/// mode per event through a `Latest` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Normal,
    /// Next click picks a geographic position (e.g. placing an entity).
    PositionPicking,
    /// Next entity click picks the target of a new connection.
    ConnectionTargetPicking { source_entity: EntityId },
    /// Lightweight quick-create mode: clicks report straight back to the
    /// host with screen coordinates.
    QuickMap,
}

#[cfg(test)]
mod tests {
    use super::InteractionMode;

    #[test]
    fn default_is_normal() {
        assert_eq!(InteractionMode::default(), InteractionMode::Normal);
    }
}
