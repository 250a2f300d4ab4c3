//! Great-circle distance between shot coordinates.

const EARTH_RADIUS_M: f64 = 6_371_000.0;
const METERS_TO_YARDS: f64 = 1.09361;

/// Haversine distance between two points in decimal degrees, rounded to the
/// nearest whole yard.
///
/// Clients use this between consecutive shots on a hole to fill the
/// `distance` field of a shot record. Identical points yield 0; the result
/// is symmetric in its arguments and never negative.
pub fn distance_yards(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> i64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let meters = EARTH_RADIUS_M * c;
    (meters * METERS_TO_YARDS).round() as i64
}
