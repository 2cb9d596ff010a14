// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions
//!
//! Generated ids name auto-registered sources and identify script tasks,
//! so every call must yield a value distinct from all earlier calls in
//! the same process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generates unique identifiers
pub trait IdGen: Clone + Send + Sync + 'static {
    fn next(&self) -> String;

    /// Next id prefixed with a kind, e.g. `trigger-<id>`
    fn next_for(&self, kind: &str) -> String {
        format!("{}-{}", kind, self.next())
    }
}

/// UUID-based ID generator for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        // Hyphenless, so names stay a single word in script output
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Sequential ID generator for testing
#[derive(Clone, Debug)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{}", self.prefix, n)
    }
}
