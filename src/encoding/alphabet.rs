// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Crockford Base32 symbol table.
//!
//! ```text
//!  index  0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
//!  symbol 0 1 2 3 4 5 6 7 8 9 A  B  C  D  E  F  G  H  J  K  M  N  P  Q  R  S  T  V  W  X  Y  Z
//! ```
//!
//! `I`, `L`, `O` and `U` are never emitted. On decode, `I`/`L` read as `1`,
//! `O` as `0`, and lower-case is accepted.

/// Digits plus upper-case letters without I, L, O, U.
pub const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Bits carried by one symbol.
pub const BITS_PER_SYMBOL: u32 = 5;

const SYMBOL_MASK: u64 = 0x1F;

/// Symbol for the low five bits of `index`.
#[inline]
pub fn symbol(index: u8) -> u8 {
    CROCKFORD[(index & 0x1F) as usize]
}

/// Index of a symbol, or `None` for characters outside the alphabet.
pub fn decode_symbol(c: u8) -> Option<u8> {
    let idx = match c.to_ascii_uppercase() {
        c @ b'0'..=b'9' => c - b'0',
        b'O' => 0,
        b'I' | b'L' => 1,
        b'U' => return None,
        c @ b'A'..=b'Z' => {
            return CROCKFORD.iter().position(|&s| s == c).map(|p| p as u8);
        },
        _ => return None,
    };
    Some(idx)
}

/// Writes `out.len()` symbol indices of `value`, most significant first.
/// High positions that exceed the width of `value` are zero.
pub fn to_indices(mut value: u64, out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        *slot = (value & SYMBOL_MASK) as u8;
        value >>= BITS_PER_SYMBOL;
    }
}

/// Inverse of [`to_indices`]. Returns `None` if the digits overflow 64 bits.
pub fn from_indices(indices: &[u8]) -> Option<u64> {
    indices.iter().try_fold(0u64, |acc, &d| {
        if acc >> (64 - BITS_PER_SYMBOL) != 0 {
            return None;
        }
        Some((acc << BITS_PER_SYMBOL) | (d as u64 & SYMBOL_MASK))
    })
}
