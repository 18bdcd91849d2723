use foundation::math::{LngLat, offset_meters};

use crate::shapes::{CIRCLE_SEGMENTS, close_ring, regular_ring};

/// An annular polygon: outer boundary plus a hole.
///
/// The inner ring winds opposite the outer so renderers treat it as a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Annulus {
    pub outer: Vec<LngLat>,
    pub inner: Vec<LngLat>,
}

/// Circular annulus used for the progress overlay.
pub fn ring_polygon(center: LngLat, inner_radius: f64, outer_radius: f64) -> Annulus {
    let outer = regular_ring(center, outer_radius, CIRCLE_SEGMENTS, 0.0);
    let mut inner = regular_ring(center, inner_radius, CIRCLE_SEGMENTS, 0.0);
    inner.reverse();
    Annulus { outer, inner }
}

/// Square annulus, for square footprints.
pub fn square_ring(center: LngLat, inner_half: f64, outer_half: f64) -> Annulus {
    let outer = square(center, outer_half);
    let mut inner = square(center, inner_half);
    inner.reverse();
    Annulus { outer, inner }
}

fn square(center: LngLat, half: f64) -> Vec<LngLat> {
    let mut ring = vec![
        offset_meters(center, -half, half),
        offset_meters(center, half, half),
        offset_meters(center, half, -half),
        offset_meters(center, -half, -half),
    ];
    close_ring(&mut ring);
    ring
}
