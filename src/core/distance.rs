use crate::models::GeoPoint;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returned by [`distance_km`] when the first point carries a missing coordinate.
///
/// Callers must check for it before comparing distances.
pub const DISTANCE_SENTINEL: f64 = i32::MIN as f64;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Unrounded distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometers, rounded half up to two decimals
///
/// A `0.0` latitude or longitude on the first point is treated as missing and
/// yields [`DISTANCE_SENTINEL`]. The second point is not checked.
pub fn distance_km(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> f64 {
    if a_lat == 0.0 || a_lng == 0.0 {
        return DISTANCE_SENTINEL;
    }

    round_to_hundredths(haversine_distance(a_lat, a_lng, b_lat, b_lng))
}

/// [`distance_km`] over two points
#[inline]
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

#[inline]
pub fn is_sentinel(distance: f64) -> bool {
    distance == DISTANCE_SENTINEL
}

// Distances are non-negative, so f64::round (half away from zero) is half up here.
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
