use domain::ShapeKind;
use foundation::math::{LngLat, offset_meters};

use std::f64::consts::TAU;

/// Sides of the circle approximation.
pub const CIRCLE_SEGMENTS: usize = 24;

/// Star inner radius as a fraction of the outer.
const STAR_INNER_RATIO: f64 = 0.4;

/// Closed footprint ring for an entity shape.
///
/// `size_m` is the enclosing diameter; every kind fits the same enclosing
/// circle. The first point is repeated as the last so the ring is closed.
/// Unknown kinds never reach this function: ingest defaults them to
/// `Circle` before geometry runs.
pub fn shape_ring(kind: ShapeKind, center: LngLat, size_m: f64) -> Vec<LngLat> {
    let radius = size_m / 2.0;
    match kind {
        ShapeKind::Circle => regular_ring(center, radius, CIRCLE_SEGMENTS, 0.0),
        // Pointing north, like the star and the triangle.
        ShapeKind::Hexagon => regular_ring(center, radius, 6, TAU / 4.0),
        ShapeKind::Triangle => regular_ring(center, radius, 3, TAU / 4.0),
        ShapeKind::Square => corner_ring(center, &square_corners(radius)),
        ShapeKind::Star => corner_ring(center, &star_corners(radius)),
        ShapeKind::Cross => corner_ring(center, &cross_corners(radius)),
    }
}

/// Regular polygon ring; `phase` rotates the first vertex.
pub(crate) fn regular_ring(
    center: LngLat,
    radius: f64,
    sides: usize,
    phase: f64,
) -> Vec<LngLat> {
    let mut ring = Vec::with_capacity(sides + 1);
    for i in 0..sides {
        let angle = phase + TAU * i as f64 / sides as f64;
        ring.push(offset_meters(
            center,
            radius * angle.cos(),
            radius * angle.sin(),
        ));
    }
    close_ring(&mut ring);
    ring
}

fn corner_ring(center: LngLat, corners: &[(f64, f64)]) -> Vec<LngLat> {
    let mut ring: Vec<LngLat> = corners
        .iter()
        .map(|(east, north)| offset_meters(center, *east, *north))
        .collect();
    close_ring(&mut ring);
    ring
}

pub(crate) fn close_ring(ring: &mut Vec<LngLat>) {
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
}

fn square_corners(radius: f64) -> Vec<(f64, f64)> {
    vec![
        (-radius, radius),
        (radius, radius),
        (radius, -radius),
        (-radius, -radius),
    ]
}

fn star_corners(outer: f64) -> Vec<(f64, f64)> {
    // Five points, ten perimeter vertices, first point up.
    let inner = outer * STAR_INNER_RATIO;
    let mut corners = Vec::with_capacity(10);
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = TAU / 4.0 + TAU * i as f64 / 10.0;
        corners.push((radius * angle.cos(), radius * angle.sin()));
    }
    corners
}

fn cross_corners(radius: f64) -> Vec<(f64, f64)> {
    // Plus sign: arm half-width is a third of the half-size.
    let w = radius / 3.0;
    let r = radius;
    vec![
        (-w, r),
        (w, r),
        (w, w),
        (r, w),
        (r, -w),
        (w, -w),
        (w, -r),
        (-w, -r),
        (-w, -w),
        (-r, -w),
        (-r, w),
        (-w, w),
    ]
}

#[cfg(test)]
mod tests {
    use super::{CIRCLE_SEGMENTS, shape_ring};
    use domain::ShapeKind;
    use foundation::math::{LngLat, displacement_m, distance_m};

    const CENTER: LngLat = LngLat {
        lng: 9.19,
        lat: 45.46,
    };

    #[test]
    fn circle_has_25_points_closed() {
        let ring = shape_ring(ShapeKind::Circle, CENTER, 50.0);
        assert_eq!(ring.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn every_kind_yields_a_closed_ring() {
        for kind in [
            ShapeKind::Circle,
            ShapeKind::Square,
            ShapeKind::Triangle,
            ShapeKind::Star,
            ShapeKind::Cross,
            ShapeKind::Hexagon,
        ] {
            let ring = shape_ring(kind, CENTER, 50.0);
            assert!(ring.len() >= 4, "{kind:?} ring too short");
            assert_eq!(ring.first(), ring.last(), "{kind:?} ring not closed");
        }
    }

    #[test]
    fn vertices_stay_within_the_enclosing_box() {
        for kind in [
            ShapeKind::Circle,
            ShapeKind::Square,
            ShapeKind::Triangle,
            ShapeKind::Star,
            ShapeKind::Cross,
            ShapeKind::Hexagon,
        ] {
            let ring = shape_ring(kind, CENTER, 50.0);
            for p in &ring {
                let d = displacement_m(CENTER, *p);
                assert!(d.x.abs() <= 25.01, "{kind:?} east {d:?}");
                assert!(d.y.abs() <= 25.01, "{kind:?} north {d:?}");
            }
        }
    }

    #[test]
    fn circle_radius_matches_diameter() {
        let ring = shape_ring(ShapeKind::Circle, CENTER, 80.0);
        for p in ring.iter().take(CIRCLE_SEGMENTS) {
            let d = distance_m(CENTER, *p);
            assert!((d - 40.0).abs() < 0.05, "vertex at {d} m");
        }
    }
}
