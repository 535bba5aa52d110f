//! Hash slicing and bitmap helpers.

use crate::hash::HashSlot;

/// Bits of hash consumed per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Number of slots a branch can address.
pub const BRANCH_WIDTH: usize = 1 << BITS_PER_LEVEL;

/// Deepest level that still reads real hash bits.
///
/// Level 6 covers bits 30..35, of which only 30 and 31 exist.
pub const MAX_LEVEL: u32 = (HashSlot::BITS - 1) / BITS_PER_LEVEL;

const SLICE_MASK: u32 = (1 << BITS_PER_LEVEL) - 1;

// ---------------------------------------------------------------------------
// Hash slicing
// ---------------------------------------------------------------------------

/// Extracts the 5-bit slice of `hash` used as a branch index at `level`.
///
/// Levels past [`MAX_LEVEL`] have no bits left and read as `0`.
#[inline]
#[must_use]
pub const fn slice(hash: HashSlot, level: u32) -> u32 {
    match hash.checked_shr(level * BITS_PER_LEVEL) {
        Some(shifted) => shifted & SLICE_MASK,
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Counts set bits with the parallel (SWAR) method, no loop over bits.
#[inline]
#[must_use]
pub const fn population_count(x: u32) -> u32 {
    let mut x = x;
    x -= (x >> 1) & 0x5555_5555;
    x = ((x >> 2) & 0x3333_3333) + (x & 0x3333_3333);
    x += x >> 4;
    x &= 0x0f0f_0f0f;
    x = x.wrapping_mul(0x0101_0101);
    x >> 24
}

/// Returns `true` if bit `index` (0..32) is set in `bitmap`.
#[inline]
#[must_use]
pub const fn is_bit_set(bitmap: u32, index: u32) -> bool {
    bitmap & (1 << index) != 0
}

/// Returns `bitmap` with bit `index` set.
#[inline]
#[must_use]
pub const fn set_bit(bitmap: u32, index: u32) -> u32 {
    bitmap | (1 << index)
}

/// Returns `bitmap` with bit `index` cleared.
#[inline]
#[must_use]
pub const fn clear_bit(bitmap: u32, index: u32) -> u32 {
    bitmap & !(1 << index)
}

/// Returns the storage offset of `slot` in a compacted branch.
///
/// Counts the occupied slots below `slot`.
#[inline]
#[must_use]
pub const fn compact_index(bitmap: u32, slot: u32) -> usize {
    population_count(bitmap & ((1 << slot) - 1)) as usize
}
