// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::OffsetPoint;

/// Approximate length of one degree, in meters, for the latitude band
/// covered by the map area. This is not a great-circle conversion.
pub const METERS_PER_DEGREE: f64 = 110_773.0;

/// Converts a distance in degrees into meters using [METERS_PER_DEGREE].
pub fn degrees_to_meters(degrees: f64) -> f64 {
    degrees * METERS_PER_DEGREE
}

/// Converts a distance in meters into degrees using [METERS_PER_DEGREE].
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Calculates the euclidean distance between two offset positions, in degrees.
///
/// Tiles are small enough that ordering points by this distance matches
/// ordering them by their distance on the ground.
pub fn offset_distance(a: OffsetPoint, b: OffsetPoint) -> f64 {
    let dlon = a.lon - b.lon;
    let dlat = a.lat - b.lat;
    (dlon * dlon + dlat * dlat).sqrt()
}

/// Straight-line distance between two offset positions, in meters.
pub fn straight_line_meters(a: OffsetPoint, b: OffsetPoint) -> f64 {
    degrees_to_meters(offset_distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_is_symmetric() {
        assert_eq!(degrees_to_meters(1.0), 110_773.0);
        assert!((meters_to_degrees(degrees_to_meters(0.0042)) - 0.0042).abs() < 1e-12);
    }

    #[test]
    fn offset_distance_is_euclidean() {
        let a = OffsetPoint::new(0.0, 0.0);
        let b = OffsetPoint::new(3.0, 4.0);
        assert_eq!(offset_distance(a, b), 5.0);
        assert_eq!(offset_distance(b, a), 5.0);
        assert_eq!(straight_line_meters(a, b), 5.0 * METERS_PER_DEGREE);
    }
}
