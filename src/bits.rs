// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Extraction of bit fields from packed 32-bit words.

const WORD_BITS: u32 = u32::BITS;

/// Extracts `length` bits starting at bit `start` of `value` and sign-extends them.
///
/// # Panics
///
/// Panics if `length > 32` or if `start + length` is not within `[1, 32]`.
pub fn extract_signed(value: u32, start: u32, length: u32) -> i32 {
    assert!(
        length <= WORD_BITS && (1..=WORD_BITS).contains(&(start + length)),
        "invalid signed bit range: start={start}, length={length}"
    );
    if length == 0 {
        return 0;
    }
    let aligned = (value << (WORD_BITS - (start + length))) as i32;
    aligned >> (WORD_BITS - length)
}

/// Extracts `length` bits starting at bit `start` of `value`, without sign extension.
///
/// The length is limited to 31 bits, so that the result always fits
/// in a non-negative `i32`.
///
/// # Panics
///
/// Panics if `length > 31` or if `start + length` is not within `[1, 32]`.
pub fn extract_unsigned(value: u32, start: u32, length: u32) -> u32 {
    assert!(
        length < WORD_BITS && (1..=WORD_BITS).contains(&(start + length)),
        "invalid unsigned bit range: start={start}, length={length}"
    );
    if length == 0 {
        return 0;
    }
    let aligned = value << (WORD_BITS - (start + length));
    aligned >> (WORD_BITS - length)
}
