// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

use log::{info, warn};

use crate::dataset::{Dataset, SqliteDataset};
use crate::{
    find_shortest_path, Algorithm, CancelToken, Error, Graph, GraphBuilder, MapOptions,
    OffsetPoint, Result, SearchOutcome,
};

/// Progress of loading a [RoadMap].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LoadState {
    NotStarted = 0,
    InProgress = 1,
    Ready = 2,
}

impl LoadState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::InProgress,
            2 => Self::Ready,
            _ => Self::NotStarted,
        }
    }
}

/// A [Graph] which is loaded once and then shared for route requests.
///
/// Loading moves the map from [LoadState::NotStarted] through [LoadState::InProgress]
/// to [LoadState::Ready]. Concurrent calls to [RoadMap::load] are serialized and only
/// the first one builds the graph; queries issued before the graph is ready fail
/// fast with [Error::NotLoaded] or [Error::LoadInProgress].
#[derive(Debug)]
pub struct RoadMap {
    options: MapOptions,
    state: AtomicU8,
    load_lock: Mutex<()>,
    graph: OnceLock<Graph>,
}

impl RoadMap {
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            state: AtomicU8::new(LoadState::NotStarted as u8),
            load_lock: Mutex::new(()),
            graph: OnceLock::new(),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_data_loaded(&self) -> bool {
        self.state() == LoadState::Ready
    }

    /// Loads the map from the SQLite database at `path`.
    /// Does nothing if the map is already loaded.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.is_data_loaded() {
            warn!("map is already loaded - ignoring {}", path.as_ref().display());
            return Ok(());
        }
        let dataset = SqliteDataset::open(path)?;
        self.load_from(&dataset)
    }

    /// Loads the map from the provided [Dataset].
    /// Does nothing if the map is already loaded.
    ///
    /// A failed load leaves the map in [LoadState::NotStarted], so it may be retried.
    pub fn load_from<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<()> {
        // The graph is only published once complete, so a poisoned lock guards no partial state.
        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.graph.get().is_some() {
            warn!("map is already loaded - ignoring repeated load");
            return Ok(());
        }

        self.state.store(LoadState::InProgress as u8, Ordering::Release);

        match GraphBuilder::build(dataset, &self.options) {
            Ok(g) => {
                info!("map ready: {} nodes, {} edges", g.node_count(), g.edge_count());
                // The lock guarantees no other loader published a graph in the meantime.
                let _ = self.graph.set(g);
                self.state.store(LoadState::Ready as u8, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                self.state.store(LoadState::NotStarted as u8, Ordering::Release);
                Err(e)
            }
        }
    }

    /// Returns the loaded [Graph].
    pub fn graph(&self) -> Result<&Graph> {
        match self.graph.get() {
            Some(g) => Ok(g),
            None if self.state() == LoadState::InProgress => Err(Error::LoadInProgress),
            None => Err(Error::NotLoaded),
        }
    }

    /// Finds the shortest route between the nodes closest to `origin` and `destination`.
    /// See [find_shortest_path].
    pub fn find_shortest_path(
        &self,
        origin: OffsetPoint,
        destination: OffsetPoint,
        algorithm: Algorithm,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome> {
        find_shortest_path(
            self.graph()?,
            &self.options,
            origin,
            destination,
            algorithm,
            cancel,
        )
    }
}
