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

/// Thomas Wang's 64-bit integer hash.
///
/// Reference: <http://web.archive.org/web/20071223173210/http://www.concentric.net/~Ttwang/tech/inthash.htm>
///
/// # Examples
///
/// ```
/// use bloomset::hash::wang64;
///
/// assert_ne!(wang64(1), wang64(2));
/// assert_eq!(wang64(42), wang64(42));
/// ```
#[inline]
pub fn wang64(mut key: u64) -> u64 {
    key = (!key).wrapping_add(key << 21); // (key << 21) - key - 1
    key ^= key >> 24;
    key = key.wrapping_add(key << 3).wrapping_add(key << 8); // key * 265
    key ^= key >> 14;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4); // key * 21
    key ^= key >> 28;
    key.wrapping_add(key << 31)
}

/// The 64-bit finalization mix of MurmurHash3.
///
/// Maps zero to zero; every other input is scattered across the full output range.
///
/// # Examples
///
/// ```
/// use bloomset::hash::fmix64;
///
/// assert_eq!(fmix64(0), 0);
/// assert_ne!(fmix64(1), fmix64(2));
/// ```
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}
