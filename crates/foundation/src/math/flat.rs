use super::Vec2;

/// Mean spherical earth radius (meters).
///
/// The engine works on a locally-flattened equirectangular approximation,
/// valid at city scale; no ellipsoid corrections.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

/// Meters spanned by one degree of latitude.
pub fn meters_per_deg_lat() -> f64 {
    EARTH_RADIUS_M * std::f64::consts::PI / 180.0
}

/// Meters spanned by one degree of longitude at the given latitude.
pub fn meters_per_deg_lng(lat_deg: f64) -> f64 {
    meters_per_deg_lat() * lat_deg.to_radians().cos()
}

/// Offsets `origin` by east/north meters in its local flat frame.
pub fn offset_meters(origin: LngLat, east_m: f64, north_m: f64) -> LngLat {
    LngLat::new(
        origin.lng + east_m / meters_per_deg_lng(origin.lat),
        origin.lat + north_m / meters_per_deg_lat(),
    )
}

/// Meter-space displacement from `a` to `b`, measured in `a`'s local frame
/// (x east, y north).
pub fn displacement_m(a: LngLat, b: LngLat) -> Vec2 {
    Vec2::new(
        (b.lng - a.lng) * meters_per_deg_lng(a.lat),
        (b.lat - a.lat) * meters_per_deg_lat(),
    )
}

/// Flat-frame distance between two nearby points (meters).
pub fn distance_m(a: LngLat, b: LngLat) -> f64 {
    displacement_m(a, b).length()
}
