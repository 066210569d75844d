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

//! Error types for bloomset operations

use std::fmt;

/// ErrorKind is all kinds of Error of bloomset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested number of bits is zero or too large.
    InvalidSize,
    /// The requested number of hash functions is zero or too large.
    InvalidHashCount,
    /// A bit index falls outside the filter's addressable range.
    OutOfRange,
    /// Two filters differ in size, hash count or seed and cannot be combined.
    IncompatibleFilters,
    /// A sizing argument other than the bit or hash count is invalid.
    InvalidArgument,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidSize => "InvalidSize",
            ErrorKind::InvalidHashCount => "InvalidHashCount",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::IncompatibleFilters => "IncompatibleFilters",
            ErrorKind::InvalidArgument => "InvalidArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all bloomset functions.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the value recorded under `key` in the error context, if any.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Constructors for the failures raised inside the crate.
impl Error {
    pub(crate) fn invalid_size(num_bits: u64, max_bits: u64) -> Self {
        Self::new(
            ErrorKind::InvalidSize,
            format!("num_bits must be in [1, {max_bits}]"),
        )
        .with_context("num_bits", num_bits)
    }

    pub(crate) fn invalid_hash_count(num_hashes: u16, max_hashes: u16) -> Self {
        Self::new(
            ErrorKind::InvalidHashCount,
            format!("num_hashes must be in [1, {max_hashes}]"),
        )
        .with_context("num_hashes", num_hashes)
    }

    pub(crate) fn out_of_range(index: u64, num_bits: u64) -> Self {
        Self::new(
            ErrorKind::OutOfRange,
            format!("bit index {index} is outside [0, {num_bits})"),
        )
        .with_context("index", index)
        .with_context("num_bits", num_bits)
    }

    pub(crate) fn incompatible(field: &'static str, ours: u64, theirs: u64) -> Self {
        Self::new(
            ErrorKind::IncompatibleFilters,
            format!("filters differ in {field}"),
        )
        .with_context("self", ours)
        .with_context("other", theirs)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
