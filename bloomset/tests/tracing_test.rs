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

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use bloomset::bloom::BloomFilter;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::not;
use tracing::Level;

const DEGENERATE_EVENT: &str = "second hash is zero, key maps to a single bit";

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a trace-level subscriber and returns everything it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[test]
fn test_lifecycle_is_logged() {
    let logs = capture_logs(|| {
        let mut filter = BloomFilter::new(1000).unwrap();
        filter.add(42);
        filter.destroy();
    });
    let logs = logs.as_str();
    assert_that!(logs, contains_substring("bloom filter initialized"));
    assert_that!(logs, contains_substring("num_words=16"));
    assert_that!(logs, contains_substring("bloom filter destroyed"));
}

#[test]
fn test_degenerate_key_traced_by_add() {
    // hash2(10) reduces to zero for a 100-bit filter with the default seed
    let logs = capture_logs(|| {
        let mut filter = BloomFilter::new(100).unwrap();
        filter.add(10);
    });
    let logs = logs.as_str();
    assert_that!(logs, contains_substring(DEGENERATE_EVENT));
    assert_that!(logs, contains_substring("key=10"));
}

#[test]
fn test_degenerate_key_traced_by_contains_and_insert() {
    let logs = capture_logs(|| {
        let mut filter = BloomFilter::new(100).unwrap();
        assert!(!filter.contains_and_insert(10));
    });
    let logs = logs.as_str();
    assert_that!(logs, contains_substring(DEGENERATE_EVENT));
    assert_that!(logs, contains_substring("key=10"));
}

#[test]
fn test_regular_key_not_traced() {
    let logs = capture_logs(|| {
        let mut filter = BloomFilter::new(1000).unwrap();
        filter.add(42);
        filter.contains_and_insert(43);
    });
    let logs = logs.as_str();
    assert_that!(logs, not(contains_substring(DEGENERATE_EVENT)));
}
