// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::path::Path;

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use super::{Dataset, EdgeRecord, NodeRecord, PathDescriptor};
use crate::{Error, OffsetPoint, Result};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS node (
        id INTEGER PRIMARY KEY,
        chunk_id TEXT NOT NULL,
        offset_lon REAL NOT NULL,
        offset_lat REAL NOT NULL,
        num_out_edges INTEGER NOT NULL DEFAULT 0,
        num_in_edges INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_node_chunk ON node (chunk_id);

    CREATE TABLE IF NOT EXISTS edge (
        id INTEGER PRIMARY KEY,
        osm_id INTEGER,
        chunk_id TEXT,
        source_node_id INTEGER NOT NULL REFERENCES node(id),
        target_node_id INTEGER NOT NULL REFERENCES node(id),
        path_length_meters REAL NOT NULL,
        path_foot INTEGER NOT NULL DEFAULT 0,
        path_car_fwd INTEGER NOT NULL,
        path_car_bwd INTEGER NOT NULL,
        path_bike_fwd INTEGER NOT NULL DEFAULT 0,
        path_bike_bwd INTEGER NOT NULL DEFAULT 0,
        path_train INTEGER NOT NULL DEFAULT 0,
        path_offset_points TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_edge_source_node ON edge (source_node_id);
    CREATE INDEX IF NOT EXISTS idx_edge_target_node ON edge (target_node_id);
";

/// [Dataset] backed by the SQLite map database.
///
/// Node positions and edge geometries are stored as offsets from the
/// top-left corner of the map area. Car access columns may hold either
/// [PathDescriptor] codes or names.
#[derive(Debug)]
pub struct SqliteDataset {
    connection: Connection,
}

impl SqliteDataset {
    /// Opens an existing database in read-only mode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening map database {}", path.display());
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { connection })
    }

    /// Opens (or creates) a database for writing and ensures all tables exist.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path)?;
        Self::create_schema(&connection)?;
        Ok(Self { connection })
    }

    /// Wraps an already open connection.
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Creates the `node` and `edge` tables (and their indices) if they don't exist.
    pub fn create_schema(connection: &Connection) -> Result<()> {
        connection.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn insert_node(&self, node: &NodeRecord) -> Result<()> {
        self.connection.execute(
            "INSERT INTO node (id, chunk_id, offset_lon, offset_lat) VALUES (?1, ?2, ?3, ?4)",
            params![node.id, node.tile_key, node.offset_lon, node.offset_lat],
        )?;
        Ok(())
    }

    /// Inserts an edge together with its geometry, ordered from the source to the target node.
    pub fn insert_edge(&self, edge: &EdgeRecord, geometry: &[OffsetPoint]) -> Result<()> {
        self.connection.execute(
            "INSERT INTO edge (id, source_node_id, target_node_id, path_length_meters, \
             path_car_fwd, path_car_bwd, path_offset_points) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                edge.id,
                edge.source_node_id,
                edge.target_node_id,
                edge.path_length_meters,
                edge.car_forward.code(),
                edge.car_backward.code(),
                format_points(geometry),
            ],
        )?;
        Ok(())
    }
}

impl Dataset for SqliteDataset {
    fn visit_nodes(&self, visit: &mut dyn FnMut(NodeRecord) -> Result<()>) -> Result<()> {
        let mut stmt = self
            .connection
            .prepare("SELECT id, chunk_id, offset_lon, offset_lat FROM node")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            visit(NodeRecord {
                id: row.get(0)?,
                tile_key: row.get(1)?,
                offset_lon: row.get(2)?,
                offset_lat: row.get(3)?,
            })?;
        }
        Ok(())
    }

    fn visit_edges(&self, visit: &mut dyn FnMut(EdgeRecord) -> Result<()>) -> Result<()> {
        let mut stmt = self.connection.prepare(
            "SELECT id, source_node_id, target_node_id, path_length_meters, \
             path_car_fwd, path_car_bwd FROM edge",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            visit(EdgeRecord {
                id: row.get(0)?,
                source_node_id: row.get(1)?,
                target_node_id: row.get(2)?,
                path_length_meters: row.get(3)?,
                car_forward: read_descriptor(row, 4)?,
                car_backward: read_descriptor(row, 5)?,
            })?;
        }
        Ok(())
    }

    fn edge_geometry(&self, edge_id: i64) -> Result<Option<Vec<OffsetPoint>>> {
        let points: Option<String> = self
            .connection
            .query_row(
                "SELECT path_offset_points FROM edge WHERE id = ?1",
                [edge_id],
                |row| row.get(0),
            )
            .optional()?;

        points
            .map(|s| parse_points(&s).ok_or(Error::InvalidGeometry { edge_id }))
            .transpose()
    }
}

fn read_descriptor(row: &Row<'_>, idx: usize) -> Result<PathDescriptor> {
    match row.get_ref(idx)? {
        ValueRef::Integer(code) => PathDescriptor::try_from(code),
        ValueRef::Text(name) => String::from_utf8_lossy(name).parse(),
        other => Err(Error::InvalidPathDescriptor(format!("{:?}", other.data_type()))),
    }
}

/// Parses a `"lon lat,lon lat,..."` point list. An empty string is an empty list.
fn parse_points(s: &str) -> Option<Vec<OffsetPoint>> {
    if s.trim().is_empty() {
        return Some(Vec::default());
    }

    s.split(',')
        .map(|pair| {
            let mut coords = pair.split_whitespace();
            let lon = coords.next()?.parse().ok()?;
            let lat = coords.next()?.parse().ok()?;
            match coords.next() {
                Some(_) => None,
                None => Some(OffsetPoint::new(lon, lat)),
            }
        })
        .collect()
}

fn format_points(points: &[OffsetPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}", p.lon, p.lat))
        .collect::<Vec<_>>()
        .join(",")
}
