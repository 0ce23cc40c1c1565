// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Shortest route found by a search.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Route {
    /// Indices of traversed [edges](crate::GraphEdge), in order from the start node.
    /// Empty if the route starts and ends at the same node.
    pub edges: Vec<usize>,

    /// Sum of the weights of all edges, in meters.
    pub weight: u64,
}

/// Result of a completed route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Route),

    /// The whole reachable part of the graph was expanded without reaching the end node.
    Unreachable,

    /// The search was stopped by its [CancelToken](crate::CancelToken).
    Cancelled,
}

impl SearchOutcome {
    /// Returns the traversed edges; empty if no route was found.
    pub fn edges(&self) -> &[usize] {
        match self {
            Self::Found(route) => &route.edges,
            Self::Unreachable | Self::Cancelled => &[],
        }
    }

    /// Converts the outcome into the traversed edges; empty if no route was found.
    pub fn into_edges(self) -> Vec<usize> {
        match self {
            Self::Found(route) => route.edges,
            Self::Unreachable | Self::Cancelled => Vec::default(),
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Found(route) => Some(route),
            Self::Unreachable | Self::Cancelled => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
