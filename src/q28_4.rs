// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Conversions of the Q28.4 fixed-point format: 28 integer bits
//! followed by 4 fractional bits (1/16 resolution).

const FRACTION_BITS: i32 = 4;

/// Returns the Q28.4 representation of an integer.
#[inline]
pub fn of_int(i: i32) -> i32 {
    i << FRACTION_BITS
}

/// Converts a Q28.4 value to an `f64`.
#[inline]
pub fn as_f64(q28_4: i32) -> f64 {
    q28_4 as f64 / (1 << FRACTION_BITS) as f64
}

/// Converts a Q28.4 value to an `f32`.
#[inline]
pub fn as_f32(q28_4: i32) -> f32 {
    q28_4 as f32 / (1 << FRACTION_BITS) as f32
}
