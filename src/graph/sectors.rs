// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::buffer::Buffer;
use super::NodeId;
use crate::math;
use crate::point::{bounds, Point};

const OFFSET_START_NODE: usize = 0;
const OFFSET_NODE_COUNT: usize = OFFSET_START_NODE + 4;

/// Size of a single sector record.
pub(crate) const SECTOR_BYTES: usize = OFFSET_NODE_COUNT + 2;

/// Number of sectors along each axis of the region.
pub const SECTORS_PER_SIDE: usize = 128;

/// Total number of sectors in the index.
pub const SECTOR_COUNT: usize = SECTORS_PER_SIDE * SECTORS_PER_SIDE;

const SECTOR_WIDTH: f64 = bounds::WIDTH / SECTORS_PER_SIDE as f64;
const SECTOR_HEIGHT: f64 = bounds::HEIGHT / SECTORS_PER_SIDE as f64;

/// Contiguous range of node ids, `start_node_id..end_node_id`, located in a single sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
}

impl Sector {
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        self.start_node_id..self.end_node_id
    }
}

/// Uniform 128×128 grid over the region, with sector `x + 128 * y`
/// covering the `x`-th column (west to east) and `y`-th row (south to north).
///
/// Each record holds the id of the first node in the sector and the number of
/// nodes in the sector. Nodes are numbered so that every sector is contiguous.
#[derive(Debug, Clone)]
pub struct SectorIndex(Buffer);

impl SectorIndex {
    pub fn new(buffer: Buffer) -> Self {
        debug_assert_eq!(buffer.len(), SECTOR_COUNT * SECTOR_BYTES);
        Self(buffer)
    }

    /// Raw record of a sector: the id of its first node and its node count.
    pub(crate) fn record(&self, index: usize) -> (NodeId, u16) {
        let offset = index * SECTOR_BYTES;
        (
            self.0.u32_at(offset + OFFSET_START_NODE),
            self.0.u16_at(offset + OFFSET_NODE_COUNT),
        )
    }

    pub fn sector(&self, index: usize) -> Sector {
        let (start_node_id, count) = self.record(index);
        Sector {
            start_node_id,
            end_node_id: start_node_id + count as NodeId,
        }
    }

    /// Returns all sectors intersecting the square centered at `center` with
    /// sides `2 * distance` long, in ascending sector index order (row by row).
    ///
    /// This is a coarse filter: sectors only touching the square are included,
    /// and nodes in the returned sectors may still lie outside of the square.
    pub fn sectors_in_area(&self, center: &Point, distance: f64) -> Vec<Sector> {
        let max = SECTORS_PER_SIDE as i32 - 1;
        let column = |e: f64| math::clamp(0, ((e - bounds::MIN_E) / SECTOR_WIDTH).floor() as i32, max);
        let row = |n: f64| math::clamp(0, ((n - bounds::MIN_N) / SECTOR_HEIGHT).floor() as i32, max);

        let (x_min, x_max) = (column(center.e() - distance), column(center.e() + distance));
        let (y_min, y_max) = (row(center.n() - distance), row(center.n() + distance));

        let mut sectors =
            Vec::with_capacity(((x_max - x_min + 1) * (y_max - y_min + 1)) as usize);
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                sectors.push(self.sector(x as usize + SECTORS_PER_SIDE * y as usize));
            }
        }
        sectors
    }
}
