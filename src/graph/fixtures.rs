// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Encoder producing small in-memory graphs for tests.

use std::fs;
use std::io;
use std::path::Path;

use super::sectors::SECTOR_COUNT;
use super::{
    AttributeSet, Buffer, EdgeTable, Graph, NodeId, NodeTable, SectorIndex, SECTORS_PER_SIDE,
};
use crate::point::{bounds, Point};

#[derive(Debug, Clone)]
pub(crate) struct FixtureEdge {
    from: NodeId,
    to: NodeId,
    length: f64,
    inverted: bool,
    samples: Vec<f32>,
    attributes: AttributeSet,
}

impl FixtureEdge {
    pub(crate) fn inverted(&mut self) -> &mut Self {
        self.inverted = true;
        self
    }

    /// Sets the profile, in the forward direction of the edge.
    /// `1 + ceil(length / 2)` samples are expected.
    pub(crate) fn profile(&mut self, samples: Vec<f32>) -> &mut Self {
        self.samples = samples;
        self
    }

    pub(crate) fn constant_elevation(&mut self, elevation: f32) -> &mut Self {
        let count = 1 + (q28_4(self.length) as usize).div_ceil(32);
        self.profile(vec![elevation; count])
    }

    pub(crate) fn attributes(&mut self, attributes: AttributeSet) -> &mut Self {
        self.attributes = attributes;
        self
    }
}

/// Graph description turned into the binary tables by [GraphFixture::build].
///
/// Nodes must be added in ascending sector order, and edges are stored
/// grouped by their source node, preserving insertion order within a node.
#[derive(Debug, Default)]
pub(crate) struct GraphFixture {
    nodes: Vec<Point>,
    edges: Vec<FixtureEdge>,
}

/// Encoded contents of every graph file.
pub(crate) struct FixtureFiles {
    pub(crate) nodes: Vec<u8>,
    pub(crate) sectors: Vec<u8>,
    pub(crate) edges: Vec<u8>,
    pub(crate) profile_ids: Vec<u8>,
    pub(crate) elevations: Vec<u8>,
    pub(crate) attributes: Vec<u8>,
}

fn q28_4(value: f64) -> u32 {
    (value * 16.0).round() as u32
}

fn sector_of(p: &Point) -> usize {
    let column = ((p.e() - bounds::MIN_E) / (bounds::WIDTH / SECTORS_PER_SIDE as f64)) as usize;
    let row = ((p.n() - bounds::MIN_N) / (bounds::HEIGHT / SECTORS_PER_SIDE as f64)) as usize;
    column.min(SECTORS_PER_SIDE - 1) + SECTORS_PER_SIDE * row.min(SECTORS_PER_SIDE - 1)
}

impl GraphFixture {
    pub(crate) fn node(&mut self, e: f64, n: f64) -> NodeId {
        let p = Point::new(e, n).expect("fixture node outside of the region");
        if let Some(last) = self.nodes.last() {
            assert!(sector_of(last) <= sector_of(&p), "fixture nodes must be sorted by sector");
        }
        self.nodes.push(p);
        (self.nodes.len() - 1) as NodeId
    }

    pub(crate) fn edge(&mut self, from: NodeId, to: NodeId, length: f64) -> &mut FixtureEdge {
        self.edges.push(FixtureEdge {
            from,
            to,
            length,
            inverted: false,
            samples: Vec::new(),
            attributes: AttributeSet::EMPTY,
        });
        self.edges.last_mut().unwrap()
    }

    /// Adds an edge whose length is the straight-line distance between its nodes.
    pub(crate) fn straight_edge(&mut self, from: NodeId, to: NodeId) -> &mut FixtureEdge {
        let length = self.nodes[from as usize].distance_to(&self.nodes[to as usize]);
        self.edge(from, to, length)
    }

    pub(crate) fn encode(&self) -> FixtureFiles {
        let mut edges = self.edges.clone();
        edges.sort_by_key(|e| e.from);

        let mut attribute_sets: Vec<AttributeSet> = Vec::new();
        let mut files = FixtureFiles {
            nodes: Vec::new(),
            sectors: Vec::new(),
            edges: Vec::new(),
            profile_ids: Vec::new(),
            elevations: Vec::new(),
            attributes: Vec::new(),
        };

        for (id, p) in self.nodes.iter().enumerate() {
            let first_edge = edges.partition_point(|e| (e.from as usize) < id) as u32;
            let degree = edges.iter().filter(|e| e.from as usize == id).count() as u32;
            assert!(degree < 16);
            files.nodes.extend_from_slice(&q28_4(p.e()).to_be_bytes());
            files.nodes.extend_from_slice(&q28_4(p.n()).to_be_bytes());
            files.nodes.extend_from_slice(&(degree << 28 | first_edge).to_be_bytes());
        }

        let mut node_sectors = self.nodes.iter().map(sector_of).peekable();
        let mut next_node = 0u32;
        for sector in 0..SECTOR_COUNT {
            let start = next_node;
            while node_sectors.next_if_eq(&sector).is_some() {
                next_node += 1;
            }
            files.sectors.extend_from_slice(&start.to_be_bytes());
            files.sectors.extend_from_slice(&((next_node - start) as u16).to_be_bytes());
        }

        for e in &edges {
            let target = if e.inverted { !(e.to as i32) } else { e.to as i32 };
            let attributes_index = match attribute_sets.iter().position(|&s| s == e.attributes) {
                Some(i) => i,
                None => {
                    attribute_sets.push(e.attributes);
                    attribute_sets.len() - 1
                }
            };
            files.edges.extend_from_slice(&target.to_be_bytes());
            files.edges.extend_from_slice(&(q28_4(e.length) as u16).to_be_bytes());
            files.edges.extend_from_slice(&0u16.to_be_bytes());
            files.edges.extend_from_slice(&(attributes_index as u16).to_be_bytes());

            if e.samples.is_empty() {
                files.profile_ids.extend_from_slice(&0u32.to_be_bytes());
            } else {
                let expected = 1 + (q28_4(e.length) as usize).div_ceil(32);
                assert_eq!(e.samples.len(), expected, "wrong number of fixture samples");

                let first_sample = (files.elevations.len() / 2) as u32;
                files.profile_ids.extend_from_slice(&(1 << 30 | first_sample).to_be_bytes());

                let mut stored = e.samples.clone();
                if e.inverted {
                    stored.reverse();
                }
                for s in stored {
                    files.elevations.extend_from_slice(&(q28_4(s as f64) as u16).to_be_bytes());
                }
            }
        }

        for set in attribute_sets {
            files.attributes.extend_from_slice(&set.bits().to_be_bytes());
        }

        files
    }

    pub(crate) fn build(&self) -> Graph {
        let files = self.encode();
        let attribute_sets = files
            .attributes
            .chunks_exact(8)
            .map(|c| AttributeSet::new(u64::from_be_bytes(c.try_into().unwrap())).unwrap())
            .collect::<Vec<_>>();
        Graph::new(
            NodeTable::new(Buffer::from(files.nodes)),
            SectorIndex::new(Buffer::from(files.sectors)),
            EdgeTable::new(
                Buffer::from(files.edges),
                Buffer::from(files.profile_ids),
                Buffer::from(files.elevations),
            ),
            attribute_sets,
        )
    }

    /// Writes all graph files into the given directory.
    pub(crate) fn write_to(&self, dir: &Path) -> io::Result<()> {
        let files = self.encode();
        fs::write(dir.join("nodes.bin"), files.nodes)?;
        fs::write(dir.join("sectors.bin"), files.sectors)?;
        fs::write(dir.join("edges.bin"), files.edges)?;
        fs::write(dir.join("profile_ids.bin"), files.profile_ids)?;
        fs::write(dir.join("elevations.bin"), files.elevations)?;
        fs::write(dir.join("attributes.bin"), files.attributes)?;
        Ok(())
    }
}
