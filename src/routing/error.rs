// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::graph::NodeId;

/// Error conditions which may occur during
/// [best_route_between](super::RouteComputer::best_route_between).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The start and end nodes are the same, so there is no route to speak of.
    #[error("start and end nodes are the same: {0}")]
    SameEndpoints(NodeId),

    /// The start or end nodes don't exist in a graph.
    #[error("invalid node: {0}")]
    InvalidReference(NodeId),
}
