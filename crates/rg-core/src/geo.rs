//! Geographic coordinate type and great-circle distance.
//!
//! `Coordinate` uses `f64` latitude/longitude exactly as read from the
//! extract.  Distances are whole metres, truncated toward zero, because that
//! is the precision the `edges.distance_m` column stores.

/// Mean Earth radius in metres used by the spherical model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
///
/// Ranges are not validated; callers pass whatever the extract contains.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance to `other` in whole metres.
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> u32 {
        distance_m(self, other)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lon)
    }
}

/// Haversine great-circle distance between `a` and `b`, truncated to metres.
///
/// `distance_m(a, a) == 0` and `distance_m(a, b) == distance_m(b, a)` for
/// every pair of coordinates.
pub fn distance_m(a: Coordinate, b: Coordinate) -> u32 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // atan2 form stays stable for both tiny and antipodal separations.
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    // `as` saturates and truncates toward zero; NaN maps to 0.
    (EARTH_RADIUS_M * c) as u32
}
