//! Great-circle distance
//!
//! Uses the Vincenty formula specialised to a sphere, which stays
//! numerically stable for both tiny and antipodal distances.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::Coordinates;

/// Calculate the surface distance between two points in meters
///
/// # Arguments
/// * `from` - First point
/// * `to` - Second point
///
/// # Returns
/// Distance in meters on a sphere with the mean Earth radius
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    great_circle_distance_with_radius(from, to, EARTH_RADIUS_METERS)
}

/// Same as [`great_circle_distance`] with an explicit sphere radius
pub fn great_circle_distance_with_radius(from: Coordinates, to: Coordinates, radius: f64) -> f64 {
    let lat_from = from.lat.to_radians();
    let lng_from = from.lng.to_radians();
    let lat_to = to.lat.to_radians();
    let lng_to = to.lng.to_radians();

    let delta_lng = lng_to - lng_from;
    let a = (lat_to.cos() * delta_lng.sin()).powi(2)
        + (lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * delta_lng.cos())
            .powi(2);
    let b = lat_from.sin() * lat_to.sin() + lat_from.cos() * lat_to.cos() * delta_lng.cos();

    a.sqrt().atan2(b) * radius
}
