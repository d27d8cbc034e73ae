//! Route metrics over parsed track points.
//!
//! A track is an ordered sequence of [`TrackPoint`]s produced by a file
//! parser. The metrics here are pure traversals over consecutive pairs:
//! they never fail, and degenerate inputs (zero or one point) simply yield
//! zero.

use crate::geodesy::planar_distance_m;

/// One recorded point of a track or route.
///
/// `ele` is the elevation recorded natively in the source file, when
/// present, independent of any tile-derived elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Native elevation in meters, if the file recorded one.
    pub ele: Option<f64>,
}

impl TrackPoint {
    /// Point without a native elevation.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            ele: None,
        }
    }

    /// Point with a native elevation.
    pub fn with_elevation(lat: f64, lon: f64, ele: f64) -> Self {
        Self {
            lat,
            lon,
            ele: Some(ele),
        }
    }
}

/// Total route distance in kilometers.
///
/// Sums the planar segment distances over consecutive pairs; 0.0 for empty
/// or single-point tracks.
pub fn total_distance_km(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| planar_distance_m(w[0].lat, w[0].lon, w[1].lat, w[1].lon))
        .sum::<f64>()
        / 1000.0
}

/// Total ascent in meters: the sum of positive elevation gains.
///
/// Only pairs where **both** points carry a native elevation contribute;
/// pairs missing either side add zero without breaking the summation.
/// Descents contribute zero, so the result is never negative.
pub fn total_ascent_m(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .filter_map(|w| match (w[0].ele, w[1].ele) {
            (Some(prev), Some(next)) => Some((next - prev).max(0.0)),
            _ => None,
        })
        .sum()
}

/// Cumulative distance in kilometers at each point, starting at 0.0.
///
/// Same length and order as the input; this is the x-axis of an elevation
/// profile.
pub fn cumulative_distances_km(points: &[TrackPoint]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(points.len());
    let mut total = 0.0;

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            let prev = &points[i - 1];
            total += planar_distance_m(prev.lat, prev.lon, point.lat, point.lon) / 1000.0;
        }
        distances.push(total);
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::meters_per_degree_lat;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_degenerate_inputs() {
        assert_eq!(total_distance_km(&[]), 0.0);
        assert_eq!(total_distance_km(&[TrackPoint::new(34.5, 71.5)]), 0.0);
    }

    #[test]
    fn test_ascent_degenerate_inputs() {
        assert_eq!(total_ascent_m(&[]), 0.0);
        assert_eq!(
            total_ascent_m(&[TrackPoint::with_elevation(34.5, 71.5, 1000.0)]),
            0.0
        );
    }

    #[test]
    fn test_ascent_counts_only_gains() {
        let points = [
            TrackPoint::with_elevation(34.5, 71.5, 100.0),
            TrackPoint::with_elevation(34.5001, 71.5, 90.0),
            TrackPoint::with_elevation(34.5002, 71.5, 120.0),
        ];
        // Descent 100→90 contributes 0, climb 90→120 contributes 30.
        assert_relative_eq!(total_ascent_m(&points), 30.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ascent_skips_pairs_missing_elevation() {
        let points = [
            TrackPoint::with_elevation(34.5, 71.5, 100.0),
            TrackPoint::new(34.5001, 71.5),
            TrackPoint::with_elevation(34.5002, 71.5, 150.0),
        ];
        // Both pairs straddle the gap; neither contributes.
        assert_eq!(total_ascent_m(&points), 0.0);
    }

    #[test]
    fn test_ascent_never_negative() {
        let points = [
            TrackPoint::with_elevation(34.5, 71.5, 500.0),
            TrackPoint::with_elevation(34.5001, 71.5, 400.0),
            TrackPoint::with_elevation(34.5002, 71.5, 300.0),
        ];
        assert_eq!(total_ascent_m(&points), 0.0);
    }

    #[test]
    fn test_short_segment_metrics() {
        let points = [
            TrackPoint::with_elevation(34.5, 71.5, 1000.0),
            TrackPoint::with_elevation(34.5001, 71.5, 1010.0),
        ];

        assert_relative_eq!(total_ascent_m(&points), 10.0, epsilon = 1e-9);

        // A 0.0001° north-south step at ~34.5°N.
        let expected_km = 0.0001 * meters_per_degree_lat(34.500_05) / 1000.0;
        assert_relative_eq!(total_distance_km(&points), expected_km, epsilon = 1e-9);
        // Roughly 11 meters.
        assert!((0.010..0.012).contains(&total_distance_km(&points)));
    }

    #[test]
    fn test_cumulative_distances() {
        let points = [
            TrackPoint::new(34.5, 71.5),
            TrackPoint::new(34.5001, 71.5),
            TrackPoint::new(34.5002, 71.5),
        ];

        let cumulative = cumulative_distances_km(&points);
        assert_eq!(cumulative.len(), 3);
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative[1] > 0.0);
        assert_relative_eq!(
            *cumulative.last().unwrap(),
            total_distance_km(&points),
            epsilon = 1e-12
        );

        assert!(cumulative_distances_km(&[]).is_empty());
    }
}
