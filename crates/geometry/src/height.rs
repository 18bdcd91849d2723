use domain::Entity;

/// Extrusion height floor (meters).
pub const MIN_HEIGHT: f64 = 35.0;
/// Extrusion height ceiling (meters).
pub const MAX_HEIGHT: f64 = 350.0;

/// Extrusion height for an entity.
///
/// Potential wins when present and positive; otherwise achieved revenue,
/// otherwise the connection count. Every branch is clamped to
/// `[MIN_HEIGHT, MAX_HEIGHT]` and monotonic non-decreasing in its metric.
pub fn entity_height(entity: &Entity, degree: u32) -> f64 {
    if let Some(potential) = entity.potential {
        if potential > 0.0 {
            return clamp(MIN_HEIGHT + potential / 500.0);
        }
    }
    if let Some(achieved) = entity.achieved {
        if achieved > 0.0 {
            return clamp(achieved / 1500.0);
        }
    }
    clamp(MIN_HEIGHT + 20.0 * degree as f64)
}

/// Height of the achieved-vs-potential progress ring.
///
/// Zero unless both potential and achieved are positive; otherwise the
/// achieved fraction of `total_height`, capped at the full height.
pub fn progress_ring_height(entity: &Entity, total_height: f64) -> f64 {
    let (Some(potential), Some(achieved)) = (entity.potential, entity.achieved) else {
        return 0.0;
    };
    if potential <= 0.0 || achieved <= 0.0 {
        return 0.0;
    }
    (achieved / potential).min(1.0) * total_height
}

fn clamp(height: f64) -> f64 {
    height.clamp(MIN_HEIGHT, MAX_HEIGHT)
}
