// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

/// Immutable, reference-counted view over the bytes of one graph file.
///
/// The backing storage is either a read-only memory map or an owned
/// allocation. Clones share the same storage and may be read from any thread.
/// All multi-byte values are stored big-endian.
#[derive(Clone)]
pub struct Buffer(Arc<dyn AsRef<[u8]> + Send + Sync>);

impl Buffer {
    pub fn from_mmap(map: memmap2::Mmap) -> Self {
        Self(Arc::new(map))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        AsRef::<[u8]>::as_ref(&*self.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.as_bytes()[offset..offset + N]);
        bytes
    }

    #[inline]
    pub fn u16_at(&self, offset: usize) -> u16 {
        u16::from_be_bytes(self.array(offset))
    }

    #[inline]
    pub fn u32_at(&self, offset: usize) -> u32 {
        u32::from_be_bytes(self.array(offset))
    }

    #[inline]
    pub fn i32_at(&self, offset: usize) -> i32 {
        i32::from_be_bytes(self.array(offset))
    }

    #[inline]
    pub fn u64_at(&self, offset: usize) -> u64 {
        u64::from_be_bytes(self.array(offset))
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer").field("len", &self.len()).finish()
    }
}
