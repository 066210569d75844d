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

use crate::bloom::BitIndices;
use crate::bloom::BloomFilterBuilder;
use crate::bloom::bit_array::BitArray;
use crate::bloom::index;
use crate::error::Error;

/// A Bloom filter over 64-bit keys.
///
/// Provides fast membership queries with:
/// - No false negatives (an added key always checks as present)
/// - Tunable false positive rate
/// - Fixed space usage, chosen at construction
///
/// Bits only ever go from 0 to 1. There is no removal, reset or resize.
///
/// Use [`BloomFilter::new`] for the default hash count, or [`BloomFilterBuilder`] for full
/// control.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Seed added to every key before mixing
    seed: u64,
    /// Number of bit indices derived per key (k)
    num_hashes: u16,
    /// Number of `add` calls, including those folded in by `union`
    num_inserts: u64,
    /// Bit array packed into u64 words
    bits: BitArray,
}

impl BloomFilter {
    /// Creates a filter with `num_bits` bits and the default hash count and seed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSize`](crate::error::ErrorKind::InvalidSize) if `num_bits`
    /// is 0 or exceeds [`MAX_NUM_BITS`](crate::bloom::MAX_NUM_BITS).
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomset::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1000).unwrap();
    /// assert_eq!(filter.capacity(), 1000);
    /// assert_eq!(filter.num_words(), 16);
    /// assert!(BloomFilter::new(0).is_err());
    /// ```
    pub fn new(num_bits: u64) -> Result<Self, Error> {
        Self::builder().num_bits(num_bits).build()
    }

    /// Returns a builder for creating a Bloom filter.
    pub fn builder() -> BloomFilterBuilder {
        BloomFilterBuilder::default()
    }

    pub(super) fn from_parts(num_bits: u64, num_hashes: u16, seed: u64) -> Self {
        let bits = BitArray::new(num_bits);
        tracing::debug!(
            num_bits,
            num_words = bits.num_words(),
            num_hashes,
            "bloom filter initialized"
        );
        BloomFilter {
            seed,
            num_hashes,
            num_inserts: 0,
            bits,
        }
    }

    /// Releases the filter's storage.
    ///
    /// Dropping the filter has the same effect; this only makes the end of its life explicit.
    /// The filter is consumed, so it cannot be used or destroyed again:
    ///
    /// ```compile_fail,E0382
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000).unwrap();
    /// filter.destroy();
    /// filter.add(1);
    /// ```
    ///
    /// ```compile_fail,E0382
    /// # use bloomset::bloom::BloomFilter;
    /// let filter = BloomFilter::new(1000).unwrap();
    /// filter.destroy();
    /// filter.destroy();
    /// ```
    pub fn destroy(self) {
        tracing::debug!(
            num_bits = self.capacity(),
            bits_used = self.bits_used(),
            "bloom filter destroyed"
        );
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds a key to the filter.
    ///
    /// Sets every bit the key maps to. Afterwards `check(key)` returns `num_hashes()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000).unwrap();
    /// filter.add(42);
    /// assert_eq!(filter.check(42), filter.num_hashes());
    /// ```
    pub fn add(&mut self, key: u64) {
        self.insert_key(key);
    }

    /// Checks a key and adds it in a single pass.
    ///
    /// Returns whether the key was possibly present before this call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000).unwrap();
    /// assert!(!filter.contains_and_insert(7));
    /// assert!(filter.contains_and_insert(7));
    /// ```
    pub fn contains_and_insert(&mut self, key: u64) -> bool {
        !self.insert_key(key)
    }

    /// Merges another filter into this one via bitwise OR.
    ///
    /// Afterwards this filter reports every key either filter reported.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompatibleFilters`](crate::error::ErrorKind::IncompatibleFilters)
    /// if the filters differ in bit count, hash count or seed. This filter is left unchanged.
    pub fn union(&mut self, other: &BloomFilter) -> Result<(), Error> {
        self.ensure_compatible(other)?;
        self.bits.union_with(&other.bits);
        self.num_inserts = self.num_inserts.saturating_add(other.num_inserts);
        Ok(())
    }

    /// Sets the bit at absolute position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if
    /// `index >= capacity()`; nothing is written.
    pub fn set_bit(&mut self, index: u64) -> Result<(), Error> {
        self.bits.set(index).map(|_| ())
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Counts how many of the key's bits are set, in `0..=num_hashes()`.
    ///
    /// A result equal to `num_hashes()` means the key is probably present; anything less means
    /// it was definitely never added.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(1000).unwrap();
    /// assert_eq!(filter.check(1), 0);
    /// filter.add(1);
    /// assert_eq!(filter.check(1), 4);
    /// ```
    pub fn check(&self, key: u64) -> u16 {
        self.derive_indices(key)
            .map(|index| u16::from(self.bits.get_reduced(index)))
            .sum()
    }

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** added (or false positive)
    /// - `false`: Key was **definitely not** added
    pub fn contains(&self, key: u64) -> bool {
        self.derive_indices(key)
            .all(|index| self.bits.get_reduced(index))
    }

    /// Reads the bit at absolute position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if
    /// `index >= capacity()`.
    pub fn get_bit(&self, index: u64) -> Result<bool, Error> {
        self.bits.get(index)
    }

    // ========================================================================
    // Index Derivation
    // ========================================================================

    /// First base hash of `key`, in `[0, capacity())`.
    pub fn hash1(&self, key: u64) -> u64 {
        index::hash1(key, self.seed, self.capacity())
    }

    /// Second base hash of `key`, in `[0, capacity())`. Used as the probe stride.
    pub fn hash2(&self, key: u64) -> u64 {
        index::hash2(key, self.seed, self.capacity())
    }

    /// Returns the `num_hashes()` bit indices `key` maps to.
    pub fn derive_indices(&self, key: u64) -> BitIndices {
        BitIndices::new(key, self.seed, self.capacity(), self.num_hashes)
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.num_bits_set() == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.bits.num_bits_set()
    }

    /// Counts the set bits by scanning the whole table.
    ///
    /// Always equal to [`bits_used()`](Self::bits_used), which is maintained incrementally.
    pub fn occupancy(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Returns the total number of addressable bits.
    pub fn capacity(&self) -> u64 {
        self.bits.num_bits()
    }

    /// Returns the number of `u64` words backing the filter.
    pub fn num_words(&self) -> usize {
        self.bits.num_words()
    }

    /// Returns the number of bit indices derived per key.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of insertions, including duplicates.
    pub fn num_inserts(&self) -> u64 {
        self.num_inserts
    }

    /// Returns the fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.bits_used() as f64 / self.capacity() as f64
    }

    /// Estimates the false positive probability from the observed load.
    ///
    /// Formula: `(1 - e^(-k * load))^k`. Assumes bits are set uniformly at random.
    pub fn estimated_fpp(&self) -> f64 {
        let k = f64::from(self.num_hashes);
        (1.0 - (-k * self.load_factor()).exp()).powf(k)
    }

    /// Returns the textbook false positive probability for the number of insertions so far.
    ///
    /// Formula: `(1 - e^(-k * n / m))^k` with `n = num_inserts()` and `m = capacity()`.
    pub fn theoretical_fpp(&self) -> f64 {
        let k = f64::from(self.num_hashes);
        let n = self.num_inserts as f64;
        let m = self.capacity() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Checks if two filters can be merged.
    ///
    /// Filters are compatible if they have the same capacity, number of hash functions and
    /// seed.
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.ensure_compatible(other).is_ok()
    }

    /// Sets every bit of `key`, returning whether any of them was previously clear.
    fn insert_key(&mut self, key: u64) -> bool {
        let indices = self.derive_indices(key);
        if indices.is_degenerate() {
            tracing::trace!(key, "second hash is zero, key maps to a single bit");
        }
        let mut newly_set = false;
        for index in indices {
            newly_set |= self.bits.set_reduced(index);
        }
        self.num_inserts += 1;
        newly_set
    }

    fn ensure_compatible(&self, other: &BloomFilter) -> Result<(), Error> {
        if self.capacity() != other.capacity() {
            return Err(Error::incompatible(
                "capacity",
                self.capacity(),
                other.capacity(),
            ));
        }
        if self.num_hashes != other.num_hashes {
            return Err(Error::incompatible(
                "num_hashes",
                u64::from(self.num_hashes),
                u64::from(other.num_hashes),
            ));
        }
        if self.seed != other.seed {
            return Err(Error::incompatible("seed", self.seed, other.seed));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_add_and_check() {
        let mut filter = BloomFilter::new(1000).unwrap();
        assert_eq!(filter.check(42), 0);
        assert!(!filter.contains(42));

        filter.add(42);
        assert_eq!(filter.check(42), 4);
        assert!(filter.contains(42));
        assert_eq!(filter.bits_used(), 4);
        assert_eq!(filter.num_inserts(), 1);
        for index in [107, 780, 453, 126] {
            assert!(filter.get_bit(index).unwrap());
        }
    }

    #[test]
    fn test_degenerate_key_sets_one_bit() {
        let mut filter = BloomFilter::new(100).unwrap();
        assert_eq!(filter.hash2(10), 0);
        filter.add(10);
        assert_eq!(filter.bits_used(), 1);
        assert_eq!(filter.check(10), 4);
        assert!(filter.get_bit(59).unwrap());
    }

    #[test]
    fn test_bit_access_bounds() {
        let mut filter = BloomFilter::new(100).unwrap();
        filter.set_bit(99).unwrap();
        assert!(filter.get_bit(99).unwrap());
        assert_eq!(
            filter.set_bit(100).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            filter.get_bit(100).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(filter.bits_used(), 1);
    }

    #[test]
    fn test_contains_and_insert_degenerate_key() {
        let mut filter = BloomFilter::new(100).unwrap();
        assert!(filter.derive_indices(10).is_degenerate());
        assert!(!filter.contains_and_insert(10));
        assert_eq!(filter.bits_used(), 1);
        assert!(filter.contains_and_insert(10));
        assert_eq!(filter.bits_used(), 1);
    }

    #[test]
    fn test_contains_and_insert_counts_insert() {
        let mut filter = BloomFilter::new(500).unwrap();
        assert!(!filter.contains_and_insert(3));
        assert!(filter.contains_and_insert(3));
        assert_eq!(filter.num_inserts(), 2);
        assert_eq!(filter.check(3), 4);
    }

    #[test]
    fn test_union_incompatible_leaves_filter_unchanged() {
        let mut f1 = BloomFilter::new(1000).unwrap();
        let f2 = BloomFilter::builder()
            .num_bits(1000)
            .seed(1)
            .build()
            .unwrap();
        f1.add(5);
        let before = f1.clone();

        let err = f1.union(&f2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleFilters);
        assert_eq!(err.message(), "filters differ in seed");
        assert_eq!(f1, before);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000).unwrap();
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);
        assert_eq!(filter.theoretical_fpp(), 0.0);

        filter.add(42);
        assert_eq!(filter.load_factor(), 0.004);
        assert!(filter.estimated_fpp() > 0.0);
        assert!(filter.theoretical_fpp() > 0.0);
    }
}
