// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Error, OffsetPoint, Result};

/// Absolute position of the top-left corner of the map area, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOrigin {
    /// Longitude of the left (western) map edge.
    pub left: f64,

    /// Latitude of the top (northern) map edge.
    pub top: f64,
}

impl GeoOrigin {
    /// Converts an absolute position into an [OffsetPoint].
    pub fn to_offset(&self, lon: f64, lat: f64) -> OffsetPoint {
        OffsetPoint::new(lon - self.left, self.top - lat)
    }

    /// Converts an [OffsetPoint] back into an absolute `(lon, lat)` pair.
    pub fn to_absolute(&self, p: OffsetPoint) -> (f64, f64) {
        (p.lon + self.left, self.top - p.lat)
    }
}

/// Controls for building a [Graph](crate::Graph) and answering route requests.
///
/// The same options must be used when loading a dataset and when querying
/// it, as `tile_size` decides which tile a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    /// Length of a tile edge, in degrees.
    pub tile_size: f64,

    /// How many rings of neighboring tiles are considered when looking for
    /// the nearest node. Zero restricts the lookup to the tile containing the query point.
    pub search_radius: u32,

    /// Top-left corner of the map area, needed only to convert absolute
    /// coordinates to and from offsets.
    pub origin: Option<GeoOrigin>,
}

impl MapOptions {
    pub fn new(tile_size: f64) -> Self {
        Self {
            tile_size,
            search_radius: 0,
            origin: None,
        }
    }

    pub fn with_search_radius(mut self, search_radius: u32) -> Self {
        self.search_radius = search_radius;
        self
    }

    pub fn with_origin(mut self, origin: GeoOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Ensures `tile_size` is usable for bucketing positions.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size.is_finite() && self.tile_size > 0.0 {
            Ok(())
        } else {
            Err(Error::InvalidTileSize(self.tile_size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_round_trip() {
        let origin = GeoOrigin {
            left: -81.40,
            top: 28.65,
        };
        let p = origin.to_offset(-81.3862789, 28.6238899);
        assert!((p.lon - 0.0137211).abs() < 1e-9);
        assert!((p.lat - 0.0261101).abs() < 1e-9);

        let (lon, lat) = origin.to_absolute(p);
        assert!((lon + 81.3862789).abs() < 1e-9);
        assert!((lat - 28.6238899).abs() < 1e-9);
    }

    #[test]
    fn validate_tile_size() {
        assert!(MapOptions::new(0.01).validate().is_ok());
        assert!(matches!(
            MapOptions::new(0.0).validate(),
            Err(Error::InvalidTileSize(_))
        ));
        assert!(matches!(
            MapOptions::new(f64::NAN).validate(),
            Err(Error::InvalidTileSize(_))
        ));
    }
}
