// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::edges::{EDGE_BYTES, PROFILE_ID_BYTES, SAMPLE_BYTES};
use super::nodes::NODE_BYTES;
use super::sectors::{SECTOR_BYTES, SECTOR_COUNT};
use super::{AttributeSet, Buffer, EdgeTable, Graph, NodeTable, SectorIndex};
use crate::point::bounds;

const ATTRIBUTE_SET_BYTES: usize = 8;

/// Error which can occur when loading a [Graph] from a directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {}", .path.display(), .reason)]
    Malformed { path: PathBuf, reason: String },
}

/// Compression of a graph file, guessed from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    None,
    Gz,
    Bz2,
}

impl Compression {
    const ALL: [Self; 3] = [Self::None, Self::Gz, Self::Bz2];

    fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Gz => ".gz",
            Self::Bz2 => ".bz2",
        }
    }
}

/// One mapped (or decompressed) graph file.
struct GraphFile {
    path: PathBuf,
    buffer: Buffer,
}

impl GraphFile {
    /// Opens `<name>.bin` in `dir`, falling back to `<name>.bin.gz` and `<name>.bin.bz2`.
    fn open(dir: &Path, name: &str) -> Result<Self, LoadError> {
        let plain = dir.join(format!("{name}.bin"));

        for compression in Compression::ALL {
            let path = dir.join(format!("{name}.bin{}", compression.suffix()));
            if !path.is_file() {
                continue;
            }

            let buffer = Self::read(&path, compression)
                .map_err(|source| LoadError::Io { path: path.clone(), source })?;
            debug!("loaded {} ({} bytes)", path.display(), buffer.len());
            return Ok(Self { path, buffer });
        }

        Err(LoadError::Io {
            path: plain,
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn read(path: &Path, compression: Compression) -> io::Result<Buffer> {
        let file = File::open(path)?;
        match compression {
            Compression::None => {
                if file.metadata()?.len() == 0 {
                    return Ok(Buffer::from(Vec::new()));
                }
                // SAFETY: graph files are treated as read-only for the lifetime of the map.
                let map = unsafe { memmap2::Mmap::map(&file)? };
                Ok(Buffer::from_mmap(map))
            }

            Compression::Gz => {
                let mut data = Vec::new();
                flate2::read::MultiGzDecoder::new(file).read_to_end(&mut data)?;
                Ok(Buffer::from(data))
            }

            Compression::Bz2 => {
                let mut data = Vec::new();
                bzip2::read::MultiBzDecoder::new(file).read_to_end(&mut data)?;
                Ok(Buffer::from(data))
            }
        }
    }

    fn malformed(&self, reason: String) -> LoadError {
        LoadError::Malformed {
            path: self.path.clone(),
            reason,
        }
    }

    /// Ensures the file is made of whole records and returns their count.
    fn record_count(&self, record_bytes: usize) -> Result<usize, LoadError> {
        if self.buffer.len() % record_bytes == 0 {
            Ok(self.buffer.len() / record_bytes)
        } else {
            Err(self.malformed(format!(
                "length {} is not a multiple of the record size {}",
                self.buffer.len(),
                record_bytes
            )))
        }
    }

    fn expect_records(&self, record_bytes: usize, expected: usize) -> Result<(), LoadError> {
        let count = self.record_count(record_bytes)?;
        if count == expected {
            Ok(())
        } else {
            Err(self.malformed(format!("expected {expected} records, got {count}")))
        }
    }
}

impl Graph {
    /// Loads a graph from the files in the given directory: `nodes.bin`, `sectors.bin`,
    /// `edges.bin`, `profile_ids.bin`, `elevations.bin` and `attributes.bin`.
    ///
    /// Uncompressed files are memory-mapped. If a file is missing, its gzip (`.bin.gz`)
    /// or bzip2 (`.bin.bz2`) compressed variant is decompressed into memory instead.
    ///
    /// Record counts and cross-references between the tables are validated,
    /// so that all accessors of the returned graph stay within their tables.
    pub fn load_from<P: AsRef<Path>>(dir: P) -> Result<Graph, LoadError> {
        let dir = dir.as_ref();

        let nodes = GraphFile::open(dir, "nodes")?;
        let sectors = GraphFile::open(dir, "sectors")?;
        let edges = GraphFile::open(dir, "edges")?;
        let profile_ids = GraphFile::open(dir, "profile_ids")?;
        let elevations = GraphFile::open(dir, "elevations")?;
        let attributes = GraphFile::open(dir, "attributes")?;

        let node_count = nodes.record_count(NODE_BYTES)?;
        let edge_count = edges.record_count(EDGE_BYTES)?;
        let sample_count = elevations.record_count(SAMPLE_BYTES)?;
        sectors.expect_records(SECTOR_BYTES, SECTOR_COUNT)?;
        profile_ids.expect_records(PROFILE_ID_BYTES, edge_count)?;

        let attribute_sets = (0..attributes.record_count(ATTRIBUTE_SET_BYTES)?)
            .map(|i| {
                AttributeSet::new(attributes.buffer.u64_at(i * ATTRIBUTE_SET_BYTES))
                    .map_err(|e| attributes.malformed(format!("attribute set {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            "graph has {} nodes, {} edges, {} elevation samples and {} attribute sets",
            node_count,
            edge_count,
            sample_count,
            attribute_sets.len()
        );

        let node_table = NodeTable::new(nodes.buffer.clone());
        let sector_index = SectorIndex::new(sectors.buffer.clone());
        let edge_table = EdgeTable::new(
            edges.buffer.clone(),
            profile_ids.buffer.clone(),
            elevations.buffer.clone(),
        );

        for i in 0..SECTOR_COUNT {
            let (start, count) = sector_index.record(i);
            if start as usize + count as usize > node_count {
                return Err(sectors.malformed(format!("sector {i} refers to missing nodes")));
            }
        }

        for node_id in 0..node_count as u32 {
            let (e, n) = (node_table.node_e(node_id), node_table.node_n(node_id));
            if !bounds::contains(e, n) {
                return Err(nodes.malformed(format!(
                    "node {node_id} at ({e}, {n}) lies outside of the region"
                )));
            }

            let degree = node_table.out_degree(node_id);
            if degree > 0 && node_table.edge_id(node_id, degree - 1) as usize >= edge_count {
                return Err(nodes.malformed(format!("node {node_id} refers to missing edges")));
            }
        }

        for edge_id in 0..edge_count as u32 {
            if edge_table.target_node_id(edge_id) as usize >= node_count {
                return Err(edges.malformed(format!("edge {edge_id} targets a missing node")));
            }
            if edge_table.profile_words(edge_id).end > sample_count {
                return Err(edges.malformed(format!(
                    "edge {edge_id} refers to missing elevation samples"
                )));
            }
            if edge_table.attributes_index(edge_id) >= attribute_sets.len() {
                return Err(edges.malformed(format!(
                    "edge {edge_id} refers to a missing attribute set"
                )));
            }
        }

        Ok(Graph::new(node_table, sector_index, edge_table, attribute_sets))
    }
}
