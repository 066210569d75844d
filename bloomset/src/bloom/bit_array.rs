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

use crate::error::Error;

const WORD_BITS: u64 = u64::BITS as u64;

/// Fixed-size bit array packed into `u64` words.
///
/// Holds exactly `ceil(num_bits / 64)` words. Bits past `num_bits` in the last word are never
/// addressable, so they stay zero for the lifetime of the array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitArray {
    num_bits: u64,
    num_bits_set: u64,
    words: Vec<u64>,
}

impl BitArray {
    /// Allocates a zeroed array covering `num_bits` bits.
    pub fn new(num_bits: u64) -> Self {
        let num_words = num_bits.div_ceil(WORD_BITS) as usize;
        BitArray {
            num_bits,
            num_bits_set: 0,
            words: vec![0u64; num_words],
        }
    }

    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Number of bits currently set, maintained incrementally.
    pub fn num_bits_set(&self) -> u64 {
        self.num_bits_set
    }

    /// Sets the bit at `index`, returning whether it was previously clear.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if
    /// `index >= num_bits`; the array is left untouched.
    pub fn set(&mut self, index: u64) -> Result<bool, Error> {
        let (word_index, mask) = self.locate(index)?;
        let word = &mut self.words[word_index];
        if *word & mask != 0 {
            return Ok(false);
        }
        *word |= mask;
        self.num_bits_set += 1;
        Ok(true)
    }

    /// Reads the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if
    /// `index >= num_bits`.
    pub fn get(&self, index: u64) -> Result<bool, Error> {
        let (word_index, mask) = self.locate(index)?;
        Ok(self.words[word_index] & mask != 0)
    }

    /// Sets a bit whose index was already reduced modulo `num_bits`.
    pub fn set_reduced(&mut self, index: u64) -> bool {
        debug_assert!(index < self.num_bits);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[(index / WORD_BITS) as usize];
        if *word & mask != 0 {
            return false;
        }
        *word |= mask;
        self.num_bits_set += 1;
        true
    }

    /// Reads a bit whose index was already reduced modulo `num_bits`.
    pub fn get_reduced(&self, index: u64) -> bool {
        debug_assert!(index < self.num_bits);
        let mask = 1u64 << (index % WORD_BITS);
        self.words[(index / WORD_BITS) as usize] & mask != 0
    }

    /// ORs `other` into this array. Both arrays must have the same length.
    pub fn union_with(&mut self, other: &BitArray) {
        debug_assert_eq!(self.num_bits, other.num_bits);
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= *other_word;
        }
        self.num_bits_set = self.count_ones();
    }

    /// Counts set bits by scanning every word.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|word| word.count_ones() as u64).sum()
    }

    fn locate(&self, index: u64) -> Result<(usize, u64), Error> {
        if index >= self.num_bits {
            return Err(Error::out_of_range(index, self.num_bits));
        }
        let word_index = (index / WORD_BITS) as usize;
        let bit_offset = index % WORD_BITS;
        Ok((word_index, 1u64 << bit_offset))
    }
}
