use foundation::math::{LngLat, Vec2, displacement_m, offset_meters};

/// One rendered arc: horizontal positions plus a per-vertex elevation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcGeometry {
    pub positions: Vec<LngLat>,
    pub elevations: Vec<f64>,
}

/// Vertical parabola between two points.
///
/// `segments + 1` points are interpolated linearly in the horizontal plane,
/// shifted sideways by `lateral_offset_m` along the perpendicular of the
/// `p1 -> p2` direction. Elevation at parameter `t = i/segments` is
/// `base + 4 * peak * t * (1 - t)`: exactly `base` at both ends and exactly
/// `base + peak` at the midpoint. Stacked bands rely on that exact maximum;
/// any replacement curve must preserve it.
///
/// Coincident endpoints have no perpendicular; the lateral offset degrades
/// to zero and the elevation profile is unchanged.
pub fn parabolic_arc(
    p1: LngLat,
    p2: LngLat,
    segments: usize,
    peak: f64,
    base: f64,
    lateral_offset_m: f64,
) -> ArcGeometry {
    let segments = segments.max(2);
    let delta = displacement_m(p1, p2);
    let side = delta
        .normalized()
        .map(|dir| dir.perp().scale(lateral_offset_m))
        .unwrap_or(Vec2::new(0.0, 0.0));

    let mut positions = Vec::with_capacity(segments + 1);
    let mut elevations = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        positions.push(offset_meters(
            p1,
            delta.x * t + side.x,
            delta.y * t + side.y,
        ));
        elevations.push(base + 4.0 * peak * t * (1.0 - t));
    }

    ArcGeometry {
        positions,
        elevations,
    }
}
