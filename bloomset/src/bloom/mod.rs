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

//! Bloom filter over 64-bit keys.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether a key
//! is a member of a set. False positive matches are possible, but false negatives are not. A
//! query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was added, [`BloomFilter::check`] returns `num_hashes()`
//! - **Possible false positives**: a key never added may still match every bit
//! - **Fixed size**: the bit count is chosen at construction and never changes
//! - **Monotonic**: bits are only ever set, never cleared
//!
//! # Usage
//!
//! ```rust
//! use bloomset::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000).unwrap();
//!
//! for key in 0..70 {
//!     filter.add(key);
//! }
//!
//! assert_eq!(filter.check(7), filter.num_hashes()); // probably present
//! assert!(filter.contains(7));
//!
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//!
//! filter.destroy();
//! ```
//!
//! # Implementation Details
//!
//! - Bits are packed in `u64` words; the table holds the minimal number of words
//! - Two independent integer mixes give the base hashes `h1` and `h2`
//!   (see [`crate::hash`])
//! - The `i`-th index of a key is `(h1 + i * h2) mod m` (Kirsch-Mitzenmacher double hashing)
//! - A key whose `h2` reduces to zero occupies a single bit instead of `k`
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod bit_array;
mod builder;
mod index;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::DEFAULT_NUM_HASHES;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::index::BitIndices;
pub use self::sketch::BloomFilter;
