// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::str::FromStr;

use crate::{Error, OffsetPoint, TileCoord};

/// Persisted classification of how a road segment may be travelled in one direction.
///
/// The variants are ordered; only [PathDescriptor::Forbidden] (the lowest one)
/// disallows travel. The remaining variants describe the kind of road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathDescriptor {
    Forbidden = 0,
    Allowed = 1,
    Residential = 2,
    Tertiary = 3,
    Secondary = 4,
    Primary = 5,
    Trunk = 6,
    Motorway = 7,

    /// Tracks and lanes share a single persisted code.
    Track = 8,
}

impl PathDescriptor {
    /// Returns `true` for all descriptors except [PathDescriptor::Forbidden].
    pub fn allows_travel(self) -> bool {
        self != Self::Forbidden
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for PathDescriptor {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Forbidden),
            1 => Ok(Self::Allowed),
            2 => Ok(Self::Residential),
            3 => Ok(Self::Tertiary),
            4 => Ok(Self::Secondary),
            5 => Ok(Self::Primary),
            6 => Ok(Self::Trunk),
            7 => Ok(Self::Motorway),
            8 => Ok(Self::Track),
            _ => Err(Error::InvalidPathDescriptor(code.to_string())),
        }
    }
}

impl FromStr for PathDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Forbidden" => Ok(Self::Forbidden),
            "Allowed" => Ok(Self::Allowed),
            "Residential" => Ok(Self::Residential),
            "Tertiary" => Ok(Self::Tertiary),
            "Secondary" => Ok(Self::Secondary),
            "Primary" => Ok(Self::Primary),
            "Trunk" => Ok(Self::Trunk),
            "Motorway" => Ok(Self::Motorway),
            "Track" | "Lane" => Ok(Self::Track),
            _ => Err(Error::InvalidPathDescriptor(s.to_string())),
        }
    }
}

/// Represents a persisted road network node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: i64,

    /// Key of the tile containing the node, as `"row,col"`.
    pub tile_key: String,

    pub offset_lon: f64,
    pub offset_lat: f64,
}

impl NodeRecord {
    /// Creates a record at the provided position, deriving its tile key from `tile_size`.
    pub fn at(id: i64, p: OffsetPoint, tile_size: f64) -> Self {
        Self {
            id,
            tile_key: TileCoord::of(p, tile_size).to_string(),
            offset_lon: p.lon,
            offset_lat: p.lat,
        }
    }

    pub fn position(&self) -> OffsetPoint {
        OffsetPoint::new(self.offset_lon, self.offset_lat)
    }
}

/// Represents a persisted road segment between two nodes.
///
/// The segment's own direction goes from `source_node_id` to `target_node_id`;
/// `car_forward` and `car_backward` decide whether a car may travel along
/// and against that direction.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub id: i64,
    pub source_node_id: i64,
    pub target_node_id: i64,
    pub path_length_meters: f64,
    pub car_forward: PathDescriptor,
    pub car_backward: PathDescriptor,
}
