use foundation::math::{LngLat, displacement_m, offset_meters};

/// Fraction of the segment length the end margins may consume, per end.
const MAX_MARGIN_FRACTION: f64 = 0.2;

/// Flat rectangle used purely for pointer hit-testing along an edge.
///
/// Centered on the `p1 - p2` segment, shortened at both ends by `margin_m`
/// (capped at 20% of the segment length so degenerate short edges still get
/// a usable ribbon) and `width_m / 2` wide on each side. Returns an empty
/// ring for coincident endpoints: the perpendicular is undefined.
pub fn hit_ribbon(p1: LngLat, p2: LngLat, width_m: f64, margin_m: f64) -> Vec<LngLat> {
    let delta = displacement_m(p1, p2);
    let length = delta.length();
    let Some(dir) = delta.normalized() else {
        return Vec::new();
    };

    let margin = margin_m.min(length * MAX_MARGIN_FRACTION);
    let side = dir.perp().scale(width_m / 2.0);
    let start = dir.scale(margin);
    let end = dir.scale(length - margin);

    let mut ring = vec![
        offset_meters(p1, start.x + side.x, start.y + side.y),
        offset_meters(p1, end.x + side.x, end.y + side.y),
        offset_meters(p1, end.x - side.x, end.y - side.y),
        offset_meters(p1, start.x - side.x, start.y - side.y),
    ];
    ring.push(ring[0]);
    ring
}
