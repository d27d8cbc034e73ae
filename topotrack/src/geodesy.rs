//! Degree-to-meter scale factors and short-segment distances on the WGS84
//! ellipsoid.
//!
//! Track files record coordinates in decimal degrees, but route metrics are
//! wanted in meters. The length of one degree varies with latitude because
//! the earth is flattened: a degree of latitude spans ~110.57 km at the
//! equator and ~111.69 km at the poles, while a degree of longitude shrinks
//! to zero toward the poles. The functions here evaluate the local scale
//! factors and combine them into a planar distance for nearby points.

use std::f64::consts::PI;

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared.
const WGS84_E2: f64 = 0.006_694_379_990_197_58;

/// Local length of one degree of latitude in meters.
///
/// Series expansion of the meridian arc on the WGS84 ellipsoid. Smaller near
/// the equator, larger near the poles.
pub fn meters_per_degree_lat(lat_deg: f64) -> f64 {
    let phi = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * phi).cos() + 1.175 * (4.0 * phi).cos()
}

/// Local length of one degree of longitude in meters.
///
/// `π·a·cos φ / (180·√(1 − e²·sin²φ))`; approaches zero at the poles.
pub fn meters_per_degree_lon(lat_deg: f64) -> f64 {
    let phi = lat_deg.to_radians();
    (PI * WGS84_A * phi.cos()) / (180.0 * (1.0 - WGS84_E2 * phi.sin() * phi.sin()).sqrt())
}

/// Planar distance in meters between two nearby points.
///
/// Both scale factors are evaluated at the mean latitude of the two points
/// and the scaled deltas are combined with the Euclidean norm. This is a
/// local flat-earth approximation, not a great-circle formula: it is meant
/// for consecutive track points. Chain it over segments rather than calling
/// it across large latitude spans.
pub fn planar_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let mid_lat = (lat1 + lat2) / 2.0;
    let dy = (lat2 - lat1) * meters_per_degree_lat(mid_lat);
    let dx = (lon2 - lon1) * meters_per_degree_lon(mid_lat);
    dx.hypot(dy)
}
