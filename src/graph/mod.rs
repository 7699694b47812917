// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::function::ElevationFunction;
use crate::point::Point;

mod attributes;
mod buffer;
mod edges;
#[cfg(test)]
pub(crate) mod fixtures;
mod loader;
mod nodes;
mod sectors;

pub use attributes::{Attribute, AttributeSet};
pub use buffer::Buffer;
pub use edges::{EdgeTable, ProfileType};
pub use loader::LoadError;
pub use nodes::NodeTable;
pub use sectors::{Sector, SectorIndex, SECTORS_PER_SIDE, SECTOR_COUNT};

/// Identifier of a node: its index in the [NodeTable].
pub type NodeId = u32;

/// Identifier of an edge: its index in the [EdgeTable].
pub type EdgeId = u32;

/// Read-only road network: nodes, directed edges between them, the
/// spatial index over nodes, and the attribute sets referenced by edges.
///
/// Every table is a view over shared immutable storage, so a Graph
/// is cheap to clone and may be queried from many threads at once.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: NodeTable,
    sectors: SectorIndex,
    edges: EdgeTable,
    attribute_sets: Arc<[AttributeSet]>,
}

impl Graph {
    pub fn new(
        nodes: NodeTable,
        sectors: SectorIndex,
        edges: EdgeTable,
        attribute_sets: impl Into<Arc<[AttributeSet]>>,
    ) -> Self {
        Self {
            nodes,
            sectors,
            edges,
            attribute_sets: attribute_sets.into(),
        }
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    /// Checks whether the id refers to an existing node.
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        (node_id as usize) < self.node_count()
    }

    /// Position of the given node.
    pub fn node_point(&self, node_id: NodeId) -> Point {
        Point::new_unchecked(self.nodes.node_e(node_id), self.nodes.node_n(node_id))
    }

    /// Number of edges leaving the given node.
    pub fn node_out_degree(&self, node_id: NodeId) -> usize {
        self.nodes.out_degree(node_id)
    }

    /// Returns the id of the `edge_index`-th edge leaving the given node.
    pub fn node_out_edge_id(&self, node_id: NodeId, edge_index: usize) -> EdgeId {
        self.nodes.edge_id(node_id, edge_index)
    }

    /// Returns an iterator over ids of all edges leaving the given node, in index order.
    pub fn node_out_edges(&self, node_id: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.node_out_degree(node_id)).map(move |i| self.node_out_edge_id(node_id, i))
    }

    /// Finds the node closest to `point`, no further than `search_distance` meters away.
    ///
    /// Only nodes from [sectors](SectorIndex::sectors_in_area) around the point
    /// are considered. They are scanned sector by sector in ascending sector order,
    /// and by ascending id within a sector; when several nodes are exactly
    /// as close, the last scanned one wins.
    pub fn node_closest_to(&self, point: &Point, search_distance: f64) -> Option<NodeId> {
        let mut best = None;
        let mut best_squared_distance = search_distance * search_distance;

        for sector in self.sectors.sectors_in_area(point, search_distance) {
            for node_id in sector.node_ids() {
                let squared_distance = self.node_point(node_id).squared_distance_to(point);
                if squared_distance <= best_squared_distance {
                    best = Some(node_id);
                    best_squared_distance = squared_distance;
                }
            }
        }

        best
    }

    /// Returns the id of the node the edge leads to.
    pub fn edge_target_node_id(&self, edge_id: EdgeId) -> NodeId {
        self.edges.target_node_id(edge_id)
    }

    /// Checks whether the edge runs against the direction of the OSM way it comes from.
    pub fn edge_is_inverted(&self, edge_id: EdgeId) -> bool {
        self.edges.is_inverted(edge_id)
    }

    pub fn edge_attributes(&self, edge_id: EdgeId) -> AttributeSet {
        self.attribute_sets[self.edges.attributes_index(edge_id)]
    }

    /// Length of the edge, in meters.
    pub fn edge_length(&self, edge_id: EdgeId) -> f64 {
        self.edges.length(edge_id)
    }

    /// Total positive elevation change along the edge, in meters.
    pub fn edge_elevation_gain(&self, edge_id: EdgeId) -> f64 {
        self.edges.elevation_gain(edge_id)
    }

    /// Returns the elevation along the edge, as a function of the position
    /// (in meters from the edge's start).
    ///
    /// Edges without a profile map every position to `NaN`.
    pub fn edge_profile(&self, edge_id: EdgeId) -> ElevationFunction {
        let samples = self.edges.profile_samples(edge_id);
        match samples.len() {
            0 => ElevationFunction::Constant(f64::NAN),
            1 => ElevationFunction::Constant(samples[0] as f64),
            _ => ElevationFunction::sampled(samples, self.edge_length(edge_id))
                .unwrap_or(ElevationFunction::Constant(f64::NAN)),
        }
    }
}
