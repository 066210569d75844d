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

//! Integer avalanche mixes used to derive bit indices from 64-bit keys.
//!
//! A Bloom filter built on double hashing needs two base hash values per key. Both come from
//! reversible 64-bit mixes: every input bit influences every output bit, so neighbouring keys
//! (0, 1, 2, ...) land far apart once reduced modulo the filter size.
//!
//! - [`wang64`] is Thomas Wang's 64-bit integer hash, built from shifts, adds and xors.
//! - [`fmix64`] is the MurmurHash3 64-bit finalizer, built from xor-shifts and two multiplies.
//!
//! The two use unrelated constants and operation orders, which keeps their outputs independent
//! enough for the Kirsch-Mitzenmacher construction.

mod mix;

pub use self::mix::fmix64;
pub use self::mix::wang64;

/// The default seed added to every key before mixing.
///
/// 9001 is a prime chosen without any claim of superiority over other seeds. Filters built with
/// different seeds map the same key to different bits and therefore cannot be combined.
pub const DEFAULT_SEED: u64 = 9001;
