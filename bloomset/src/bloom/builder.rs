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

use crate::bloom::BloomFilter;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::DEFAULT_SEED;

/// Number of hash functions used when none is configured.
pub const DEFAULT_NUM_HASHES: u16 = 4;
/// Upper bound on the number of hash functions.
pub const MAX_NUM_HASHES: u16 = 100;
/// Upper bound on the number of bits (~4 GiB of words).
pub const MAX_NUM_BITS: u64 = (1u64 << 35) - 64;

const MIN_SUGGESTED_BITS: u64 = 64;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`num_bits()`](Self::num_bits): Specify the exact bit count; the hash count defaults to
///   [`DEFAULT_NUM_HASHES`]
/// - [`with_accuracy()`](Self::with_accuracy): Specify target items and false positive rate
///
/// # Examples
///
/// ```
/// use bloomset::bloom::BloomFilter;
///
/// let filter = BloomFilter::builder()
///     .num_bits(1000)
///     .num_hashes(4)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(filter.capacity(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: Option<u64>,
    num_hashes: u16,
    seed: u64,
}

impl Default for BloomFilterBuilder {
    fn default() -> Self {
        BloomFilterBuilder {
            num_bits: None,
            num_hashes: DEFAULT_NUM_HASHES,
            seed: DEFAULT_SEED,
        }
    }
}

impl BloomFilterBuilder {
    /// Creates a builder sized for a target accuracy.
    ///
    /// Calculates the number of bits and hash functions that achieve the desired false
    /// positive probability for `max_items` distinct keys.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `max_items` is 0 or `fpp` is not in
    /// `(0.0, 1.0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "max_items must be greater than 0",
            ));
        }
        if fpp.is_nan() || fpp <= 0.0 || fpp >= 1.0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "fpp must be between 0.0 and 1.0 (exclusive)",
            )
            .with_context("fpp", fpp));
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        let num_hashes = Self::suggest_num_hashes(max_items, num_bits);
        Ok(BloomFilterBuilder {
            num_bits: Some(num_bits),
            num_hashes,
            seed: DEFAULT_SEED,
        })
    }

    /// Sets the total number of addressable bits.
    pub fn num_bits(mut self, num_bits: u64) -> Self {
        self.num_bits = Some(num_bits);
        self
    }

    /// Sets the number of bit indices derived per key (k).
    pub fn num_hashes(mut self, num_hashes: u16) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Sets the seed added to every key before mixing (default: 9001).
    ///
    /// **Important**: Filters with different seeds cannot be merged.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidSize`] if the bit count was never set, is 0, or exceeds
    ///   [`MAX_NUM_BITS`].
    /// - [`ErrorKind::InvalidHashCount`] if the hash count is 0 or exceeds [`MAX_NUM_HASHES`].
    pub fn build(self) -> Result<BloomFilter, Error> {
        let num_bits = self.num_bits.ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidSize,
                "num_bits() or with_accuracy() must be called before build()",
            )
        })?;
        if num_bits == 0 || num_bits > MAX_NUM_BITS {
            return Err(Error::invalid_size(num_bits, MAX_NUM_BITS));
        }
        if self.num_hashes == 0 || self.num_hashes > MAX_NUM_HASHES {
            return Err(Error::invalid_hash_count(self.num_hashes, MAX_NUM_HASHES));
        }

        Ok(BloomFilter::from_parts(
            num_bits,
            self.num_hashes,
            self.seed,
        ))
    }

    /// Suggests the number of bits for `max_items` keys at false positive rate `fpp`.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`, rounded up to a multiple of 64.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01);
    /// assert_eq!(bits, 9600); // ~9586 bits rounded up
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u64 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * fpp.ln() / ln2_squared)
            .ceil()
            .min(MAX_NUM_BITS as f64) as u64;
        let bits = bits.div_ceil(64) * 64;

        bits.clamp(MIN_SUGGESTED_BITS, MAX_NUM_BITS)
    }

    /// Suggests the number of hash functions for `max_items` keys in `num_bits` bits.
    ///
    /// Formula: `k = (m/n) * ln(2)`
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomset::bloom::BloomFilterBuilder;
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 10_000), 7);
    /// assert_eq!(BloomFilterBuilder::suggest_num_hashes(100, 1000), 7);
    /// ```
    pub fn suggest_num_hashes(max_items: u64, num_bits: u64) -> u16 {
        let m = num_bits as f64;
        let n = max_items.max(1) as f64;

        let k = (m / n * std::f64::consts::LN_2).round();

        (k as u16).clamp(1, MAX_NUM_HASHES)
    }
}
