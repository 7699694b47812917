// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::buffer::Buffer;
use super::{EdgeId, NodeId};
use crate::bits::extract_unsigned;
use crate::q28_4;

const OFFSET_E: usize = 0;
const OFFSET_N: usize = OFFSET_E + 4;
const OFFSET_OUT_EDGES: usize = OFFSET_N + 4;

/// Size of a single node record: E, N, and the packed out-edges word.
pub(crate) const NODE_BYTES: usize = OFFSET_OUT_EDGES + 4;

const FIRST_EDGE_START: u32 = 0;
const FIRST_EDGE_LENGTH: u32 = 28;
const OUT_DEGREE_START: u32 = 28;
const OUT_DEGREE_LENGTH: u32 = 4;

/// Flat table of all nodes of the graph.
///
/// Each record holds the E and N coordinates (Q28.4) followed by a word
/// whose 4 high bits are the out-degree, and 28 low bits are the id
/// of the first outgoing edge. Outgoing edges of a node are consecutive.
#[derive(Debug, Clone)]
pub struct NodeTable(Buffer);

impl NodeTable {
    pub fn new(buffer: Buffer) -> Self {
        debug_assert_eq!(buffer.len() % NODE_BYTES, 0);
        Self(buffer)
    }

    pub fn count(&self) -> usize {
        self.0.len() / NODE_BYTES
    }

    #[inline]
    fn offset(node_id: NodeId) -> usize {
        node_id as usize * NODE_BYTES
    }

    pub fn node_e(&self, node_id: NodeId) -> f64 {
        q28_4::as_f64(self.0.i32_at(Self::offset(node_id) + OFFSET_E))
    }

    pub fn node_n(&self, node_id: NodeId) -> f64 {
        q28_4::as_f64(self.0.i32_at(Self::offset(node_id) + OFFSET_N))
    }

    #[inline]
    fn out_edges_word(&self, node_id: NodeId) -> u32 {
        self.0.u32_at(Self::offset(node_id) + OFFSET_OUT_EDGES)
    }

    pub fn out_degree(&self, node_id: NodeId) -> usize {
        extract_unsigned(
            self.out_edges_word(node_id),
            OUT_DEGREE_START,
            OUT_DEGREE_LENGTH,
        ) as usize
    }

    /// Id of the `edge_index`-th edge leaving the node.
    pub fn edge_id(&self, node_id: NodeId, edge_index: usize) -> EdgeId {
        debug_assert!(edge_index < self.out_degree(node_id));
        let first = extract_unsigned(
            self.out_edges_word(node_id),
            FIRST_EDGE_START,
            FIRST_EDGE_LENGTH,
        );
        first + edge_index as EdgeId
    }
}
