// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::iter::FusedIterator;

use crate::hash::fmix64;
use crate::hash::wang64;

/// First base hash: Thomas Wang's mix of the seeded key, reduced modulo `num_bits`.
#[inline]
pub(crate) fn hash1(key: u64, seed: u64, num_bits: u64) -> u64 {
    wang64(key.wrapping_add(seed)) % num_bits
}

/// Second base hash: the MurmurHash3 finalizer of the seeded key, reduced modulo `num_bits`.
#[inline]
pub(crate) fn hash2(key: u64, seed: u64, num_bits: u64) -> u64 {
    fmix64(key.wrapping_add(seed)) % num_bits
}

/// The `k` bit indices a key maps to, in probe order.
///
/// Index `i` is `(h1 + i * h2) mod num_bits` (Kirsch-Mitzenmacher double hashing). Both base
/// hashes are already reduced below `num_bits`, and the combination is computed in 128-bit
/// arithmetic, so every yielded index lies in `[0, num_bits)` for any filter size.
///
/// When `h2 == 0` all `k` indices coincide and the key occupies a single bit. This is
/// inherent to double hashing and is left as is; see [`BitIndices::is_degenerate`].
///
/// # Examples
///
/// ```
/// use bloomset::bloom::BloomFilter;
///
/// let filter = BloomFilter::new(1000).unwrap();
/// let indices: Vec<u64> = filter.derive_indices(42).collect();
/// assert_eq!(indices.len(), 4);
/// assert!(indices.iter().all(|&i| i < 1000));
/// ```
#[derive(Debug, Clone)]
pub struct BitIndices {
    h1: u64,
    h2: u64,
    num_bits: u64,
    next: u16,
    count: u16,
}

impl BitIndices {
    pub(crate) fn new(key: u64, seed: u64, num_bits: u64, count: u16) -> Self {
        BitIndices {
            h1: hash1(key, seed, num_bits),
            h2: hash2(key, seed, num_bits),
            num_bits,
            next: 0,
            count,
        }
    }

    /// Returns whether every index of this key collapses onto the same bit.
    pub fn is_degenerate(&self) -> bool {
        self.h2 == 0
    }

    fn index_at(&self, i: u16) -> u64 {
        let combined = u128::from(self.h1) + u128::from(i) * u128::from(self.h2);
        (combined % u128::from(self.num_bits)) as u64
    }
}

impl Iterator for BitIndices {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.count {
            return None;
        }
        let index = self.index_at(self.next);
        self.next += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.count - self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitIndices {}

impl FusedIterator for BitIndices {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DEFAULT_SEED;

    #[test]
    fn test_base_hashes_for_small_filter() {
        let keys = [0u64, 1, 2, 3, 13, 97];
        let h1: Vec<u64> = keys.iter().map(|&k| hash1(k, DEFAULT_SEED, 100)).collect();
        let h2: Vec<u64> = keys.iter().map(|&k| hash2(k, DEFAULT_SEED, 100)).collect();
        assert_eq!(h1, vec![45, 71, 44, 71, 29, 16]);
        assert_eq!(h2, vec![90, 4, 14, 79, 26, 46]);
    }

    #[test]
    fn test_indices_follow_double_hashing() {
        let indices: Vec<u64> = BitIndices::new(42, DEFAULT_SEED, 1000, 4).collect();
        assert_eq!(indices, vec![107, 780, 453, 126]);

        let h1 = hash1(42, DEFAULT_SEED, 1000);
        let h2 = hash2(42, DEFAULT_SEED, 1000);
        for (i, index) in indices.iter().enumerate() {
            assert_eq!(*index, (h1 + i as u64 * h2) % 1000);
        }
    }

    #[test]
    fn test_degenerate_key_collapses() {
        // hash2(10) == 0 for a 100-bit filter with the default seed
        let indices = BitIndices::new(10, DEFAULT_SEED, 100, 4);
        assert!(indices.is_degenerate());
        assert_eq!(indices.collect::<Vec<_>>(), vec![59, 59, 59, 59]);
    }

    #[test]
    fn test_exact_size() {
        let mut indices = BitIndices::new(7, DEFAULT_SEED, 64, 3);
        assert_eq!(indices.len(), 3);
        indices.next();
        assert_eq!(indices.len(), 2);
        indices.next();
        indices.next();
        assert_eq!(indices.next(), None);
        assert_eq!(indices.next(), None);
    }

    #[test]
    fn test_no_overflow_for_huge_filters() {
        let num_bits = u64::MAX;
        let indices: Vec<u64> = BitIndices::new(5, DEFAULT_SEED, num_bits, 100).collect();
        assert_eq!(indices.len(), 100);
        assert!(indices.iter().all(|&i| i < num_bits));
    }

    #[test]
    fn test_single_bit_filter() {
        let indices: Vec<u64> = BitIndices::new(123, DEFAULT_SEED, 1, 4).collect();
        assert_eq!(indices, vec![0, 0, 0, 0]);
    }
}
