// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::buffer::Buffer;
use super::{EdgeId, NodeId};
use crate::bits::{extract_signed, extract_unsigned};
use crate::{math, q28_4};

const OFFSET_TARGET: usize = 0;
const OFFSET_LENGTH: usize = OFFSET_TARGET + 4;
const OFFSET_ELEVATION_GAIN: usize = OFFSET_LENGTH + 2;
const OFFSET_ATTRIBUTES: usize = OFFSET_ELEVATION_GAIN + 2;

/// Size of a single edge record.
pub(crate) const EDGE_BYTES: usize = OFFSET_ATTRIBUTES + 2;

/// Size of a single entry of the profile id table.
pub(crate) const PROFILE_ID_BYTES: usize = 4;

/// Size of a single elevation sample.
pub(crate) const SAMPLE_BYTES: usize = 2;

const PROFILE_TYPE_START: u32 = 30;
const PROFILE_TYPE_LENGTH: u32 = 2;
const FIRST_SAMPLE_LENGTH: u32 = 30;

/// Distance between two consecutive elevation samples of an edge, in meters.
const SAMPLE_SPACING: i32 = 2;

/// How elevation samples of an edge are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    /// The edge has no elevation profile.
    None,

    /// Every sample is stored as an unsigned Q28.4 value.
    Uncompressed,

    /// First sample as an unsigned Q28.4 value, followed by signed
    /// 8-bit (Q4.4) differences, two per 16-bit word.
    Compressed44,

    /// First sample as an unsigned Q28.4 value, followed by signed
    /// 4-bit (Q0.4) differences, four per 16-bit word.
    Compressed04,
}

impl ProfileType {
    fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::None,
            1 => Self::Uncompressed,
            2 => Self::Compressed44,
            _ => Self::Compressed04,
        }
    }

    /// Number of bits used by a single difference, for compressed profiles.
    fn delta_bits(self) -> u32 {
        match self {
            Self::Compressed44 => 8,
            Self::Compressed04 => 4,
            Self::None | Self::Uncompressed => 16,
        }
    }
}

/// Flat table of all edges of the graph, together with their elevation profiles.
///
/// An edge record consists of:
/// - a 32-bit word whose top bit tells if the edge runs against the direction
///   of the OSM way it comes from; for such inverted edges the word holds the
///   bitwise complement of the target node id,
/// - the length in meters (unsigned Q12.4),
/// - the total elevation gain in meters (unsigned Q12.4),
/// - the index of the edge's [AttributeSet](super::AttributeSet).
///
/// Profile ids hold, per edge, a 2-bit [ProfileType] and the 30-bit index of
/// its first sample in the elevations array.
#[derive(Debug, Clone)]
pub struct EdgeTable {
    edges: Buffer,
    profile_ids: Buffer,
    elevations: Buffer,
}

impl EdgeTable {
    pub fn new(edges: Buffer, profile_ids: Buffer, elevations: Buffer) -> Self {
        debug_assert_eq!(edges.len() % EDGE_BYTES, 0);
        debug_assert_eq!(profile_ids.len(), edges.len() / EDGE_BYTES * PROFILE_ID_BYTES);
        Self {
            edges,
            profile_ids,
            elevations,
        }
    }

    pub fn count(&self) -> usize {
        self.edges.len() / EDGE_BYTES
    }

    #[inline]
    fn offset(edge_id: EdgeId) -> usize {
        edge_id as usize * EDGE_BYTES
    }

    #[inline]
    fn target_word(&self, edge_id: EdgeId) -> i32 {
        self.edges.i32_at(Self::offset(edge_id) + OFFSET_TARGET)
    }

    /// Checks whether the edge runs against the direction of its OSM way.
    pub fn is_inverted(&self, edge_id: EdgeId) -> bool {
        self.target_word(edge_id) < 0
    }

    pub fn target_node_id(&self, edge_id: EdgeId) -> NodeId {
        let word = self.target_word(edge_id);
        if word < 0 {
            !word as NodeId
        } else {
            word as NodeId
        }
    }

    #[inline]
    fn length_q28_4(&self, edge_id: EdgeId) -> i32 {
        self.edges.u16_at(Self::offset(edge_id) + OFFSET_LENGTH) as i32
    }

    /// Length of the edge, in meters.
    pub fn length(&self, edge_id: EdgeId) -> f64 {
        q28_4::as_f64(self.length_q28_4(edge_id))
    }

    /// Total positive elevation change along the edge, in meters.
    pub fn elevation_gain(&self, edge_id: EdgeId) -> f64 {
        q28_4::as_f64(self.edges.u16_at(Self::offset(edge_id) + OFFSET_ELEVATION_GAIN) as i32)
    }

    /// Index of the edge's attribute set in the graph's attribute set list.
    pub fn attributes_index(&self, edge_id: EdgeId) -> usize {
        self.edges.u16_at(Self::offset(edge_id) + OFFSET_ATTRIBUTES) as usize
    }

    #[inline]
    fn profile_word(&self, edge_id: EdgeId) -> u32 {
        self.profile_ids.u32_at(edge_id as usize * PROFILE_ID_BYTES)
    }

    pub fn profile_type(&self, edge_id: EdgeId) -> ProfileType {
        ProfileType::from_bits(extract_unsigned(
            self.profile_word(edge_id),
            PROFILE_TYPE_START,
            PROFILE_TYPE_LENGTH,
        ))
    }

    pub fn has_profile(&self, edge_id: EdgeId) -> bool {
        self.profile_type(edge_id) != ProfileType::None
    }

    #[inline]
    fn sample_word(&self, index: usize) -> u16 {
        self.elevations.u16_at(index * SAMPLE_BYTES)
    }

    /// Number of samples of the edge's profile, if it had one.
    #[inline]
    fn sample_count(&self, edge_id: EdgeId) -> usize {
        1 + math::ceil_div(self.length_q28_4(edge_id), q28_4::of_int(SAMPLE_SPACING)) as usize
    }

    #[inline]
    fn first_sample_index(&self, edge_id: EdgeId) -> usize {
        extract_unsigned(self.profile_word(edge_id), 0, FIRST_SAMPLE_LENGTH) as usize
    }

    /// Range of 16-bit words of the elevations array used by the edge's profile.
    pub(crate) fn profile_words(&self, edge_id: EdgeId) -> std::ops::Range<usize> {
        let first = self.first_sample_index(edge_id);
        let count = self.sample_count(edge_id);
        let words = match self.profile_type(edge_id) {
            ProfileType::None => 0,
            ProfileType::Uncompressed => count,
            t => {
                let per_word = (u16::BITS / t.delta_bits()) as usize;
                1 + (count - 1).div_ceil(per_word)
            }
        };
        first..first + words
    }

    /// Decodes the elevation samples of an edge, spaced at most 2 meters apart,
    /// ordered in the direction of the edge. Returns an empty vector
    /// if the edge has no profile.
    pub fn profile_samples(&self, edge_id: EdgeId) -> Vec<f32> {
        let profile_type = self.profile_type(edge_id);
        if profile_type == ProfileType::None {
            return Vec::new();
        }

        let count = self.sample_count(edge_id);
        let first = self.first_sample_index(edge_id);

        let mut samples = Vec::with_capacity(count);
        match profile_type {
            ProfileType::None => unreachable!(),

            ProfileType::Uncompressed => samples.extend(
                (first..first + count).map(|i| q28_4::as_f32(self.sample_word(i) as i32)),
            ),

            ProfileType::Compressed44 | ProfileType::Compressed04 => {
                let delta_bits = profile_type.delta_bits();
                let per_word = (u16::BITS / delta_bits) as usize;

                let mut current = q28_4::as_f32(self.sample_word(first) as i32);
                samples.push(current);

                for i in 1..count {
                    let word = self.sample_word(first + 1 + (i - 1) / per_word);
                    let slot = ((i - 1) % per_word) as u32;
                    let start = u16::BITS - delta_bits * (slot + 1);
                    current += q28_4::as_f32(extract_signed(word as u32, start, delta_bits));
                    samples.push(current);
                }
            }
        }

        if self.is_inverted(edge_id) {
            samples.reverse();
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_record(target: i32, length: u16, gain: u16, attributes: u16) -> Vec<u8> {
        let mut r = Vec::with_capacity(EDGE_BYTES);
        r.extend_from_slice(&target.to_be_bytes());
        r.extend_from_slice(&length.to_be_bytes());
        r.extend_from_slice(&gain.to_be_bytes());
        r.extend_from_slice(&attributes.to_be_bytes());
        r
    }

    fn table(edges: &[Vec<u8>], profile_ids: &[u32], elevations: &[u16]) -> EdgeTable {
        EdgeTable::new(
            Buffer::from(edges.concat()),
            Buffer::from(profile_ids.iter().flat_map(|p| p.to_be_bytes()).collect::<Vec<_>>()),
            Buffer::from(elevations.iter().flat_map(|e| e.to_be_bytes()).collect::<Vec<_>>()),
        )
    }

    #[test]
    fn decodes_fields() {
        let t = table(
            &[edge_record(12, 0x10b, 0x18, 2), edge_record(!53, 0x40, 0, 7)],
            &[0, 0],
            &[],
        );
        assert_eq!(t.count(), 2);

        assert!(!t.is_inverted(0));
        assert_eq!(t.target_node_id(0), 12);
        assert_eq!(t.length(0), 16.6875);
        assert_eq!(t.elevation_gain(0), 1.5);
        assert_eq!(t.attributes_index(0), 2);

        assert!(t.is_inverted(1));
        assert_eq!(t.target_node_id(1), 53);
        assert_eq!(t.length(1), 4.0);
        assert_eq!(t.attributes_index(1), 7);
    }

    #[test]
    fn no_profile_is_empty() {
        let t = table(
            &[edge_record(1, 0x50, 0, 0), edge_record(!1, 0x50, 0, 0)],
            &[5, 5],
            &[0; 8],
        );
        assert!(!t.has_profile(0));
        assert!(t.profile_samples(0).is_empty());
        assert!(t.profile_samples(1).is_empty());
    }

    #[test]
    fn uncompressed_profile() {
        // length 4 m → 1 + ceil(4 / 2) = 3 samples: 10, 12, 15
        let t = table(
            &[edge_record(1, 0x40, 0, 0), edge_record(!1, 0x40, 0, 0)],
            &[1 << 30 | 1, 1 << 30 | 1],
            &[0xFFFF, 10 << 4, 12 << 4, 15 << 4],
        );
        assert_eq!(t.profile_type(0), ProfileType::Uncompressed);
        assert_eq!(t.profile_samples(0), vec![10.0, 12.0, 15.0]);
        assert_eq!(t.profile_samples(1), vec![15.0, 12.0, 10.0]);
    }

    #[test]
    fn compressed_44_profile() {
        // length 8.5 m → 1 + ceil(136 / 32) = 6 samples
        let deltas: [i8; 5] = [16, -8, 3, 0, -32];
        let packed = |a: i8, b: i8| (a as u8 as u16) << 8 | b as u8 as u16;
        let t = table(
            &[edge_record(0, 0x88, 0, 0)],
            &[2 << 30],
            &[
                384 << 4,
                packed(deltas[0], deltas[1]),
                packed(deltas[2], deltas[3]),
                packed(deltas[4], 0x7F),
            ],
        );
        assert_eq!(t.profile_type(0), ProfileType::Compressed44);

        let mut expected = vec![384.0f32];
        for d in &deltas {
            let last = *expected.last().unwrap();
            expected.push(last + *d as f32 / 16.0);
        }
        assert_eq!(t.profile_samples(0), expected);
    }

    #[test]
    fn profile_word_ranges() {
        let t = table(
            &[
                edge_record(0, 0xA0, 0, 0),
                edge_record(0, 0xA0, 0, 0),
                edge_record(0, 0xA0, 0, 0),
                edge_record(0, 0xA0, 0, 0),
            ],
            &[7, 1 << 30 | 7, 2 << 30 | 7, 3 << 30 | 7],
            &[],
        );
        assert_eq!(t.profile_words(0), 7..7);
        assert_eq!(t.profile_words(1), 7..13);
        assert_eq!(t.profile_words(2), 7..11);
        assert_eq!(t.profile_words(3), 7..10);
    }

    #[test]
    fn compressed_04_profile() {
        // length 10 m → 6 samples, five 4-bit deltas: +1, -2, +7, -8, +3 (sixteenths)
        let t = table(
            &[edge_record(!0, 0xA0, 0, 0)],
            &[3 << 30],
            &[1000 << 4, 0x1E78, 0x3000],
        );
        assert_eq!(t.profile_type(0), ProfileType::Compressed04);

        let forward = [1000.0f32, 1000.0625, 999.9375, 1000.375, 999.875, 1000.0625];
        let mut expected = forward.to_vec();
        expected.reverse();
        assert_eq!(t.profile_samples(0), expected);
    }
}
