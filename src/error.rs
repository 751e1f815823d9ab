// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error conditions which may occur when building or querying a [Graph](crate::Graph),
/// or when searching for a route with [find_route](crate::find_route) or
/// [shortest_path](crate::shortest_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A vertex with the given id doesn't exist in the graph.
    #[error("vertex not found: {0}")]
    VertexNotFound(i64),

    /// Both endpoints exist, but lie in disconnected parts of the graph.
    #[error("no path from vertex {from} to vertex {to}")]
    PathNotFound { from: i64, to: i64 },

    /// Nearest vertex was requested from a graph without any vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// A vertex with the given id was already added to the graph.
    #[error("duplicate vertex: {0}")]
    DuplicateVertex(i64),

    /// A vertex with the given id has a non-finite longitude or latitude.
    #[error("invalid coordinates of vertex {0}")]
    InvalidCoordinate(i64),

    /// Nearest vertex was requested for a non-finite longitude or latitude.
    #[error("invalid query position")]
    InvalidPosition,

    /// Route search has exceeded its limit of steps.
    ///
    /// Concluding that no route exists requires traversing the whole
    /// connected component of the start vertex. The step limit protects
    /// against resource exhaustion.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}

pub type Result<T> = std::result::Result<T, Error>;
