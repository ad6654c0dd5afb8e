//! Geodesic distance
//!
//! Great-circle distance between coordinates using the haversine formula.
//! Samples are summed exactly as captured: repeated or jittery fixes add
//! their own (small) distance.

use super::Coordinate;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance between two coordinates in meters
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();
    
    // Haversine formula
    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    
    EARTH_RADIUS_M * c
}

/// Total length of a path in meters, summed over consecutive pairs in order
///
/// Paths with fewer than two points have zero length.
pub fn total_distance(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|pair| distance(pair[0], pair[1])).sum()
}
