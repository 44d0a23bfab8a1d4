//! Bucket placement: polynomial rolling hash reduced modulo the table size.

use core::num::NonZeroUsize;

/// Multiplier of the rolling hash.
const MULTIPLIER: u64 = 31;

/// Raw rolling hash of `bytes`: `h = 31 * h + byte`, wrapping on overflow.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |h, &b| {
        h.wrapping_mul(MULTIPLIER).wrapping_add(u64::from(b))
    })
}

/// Bucket index of `key` in a table of `size` buckets, always in `[0, size)`.
#[inline]
pub fn hash(key: &[u8], size: NonZeroUsize) -> usize {
    // usize -> u64 is lossless on every supported target
    (hash_bytes(key) % size.get() as u64) as usize
}
