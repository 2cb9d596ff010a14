// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trailing lines kept for trigger matching

use snare_core::InlineStyle;
use std::collections::VecDeque;

/// Keeps the last `capacity` lines, plus the styles of the newest one
#[derive(Debug)]
pub(crate) struct LineCache {
    capacity: usize,
    lines: VecDeque<String>,
    last_styles: Vec<InlineStyle>,
}

impl LineCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::with_capacity(capacity),
            last_styles: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a line, dropping its line terminator
    pub(crate) fn push(&mut self, line: &str, styles: Vec<InlineStyle>) {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
        self.last_styles = styles;
    }

    /// Newest line and its styles
    pub(crate) fn last(&self) -> Option<(&str, &[InlineStyle])> {
        self.lines
            .back()
            .map(|line| (line.as_str(), self.last_styles.as_slice()))
    }

    /// Newest `n` lines joined by `\n`, oldest first.
    ///
    /// `None` until `n` lines have been seen.
    pub(crate) fn last_n(&self, n: usize) -> Option<String> {
        if n == 0 || n > self.lines.len() {
            return None;
        }
        let start = self.lines.len() - n;
        let joined = self
            .lines
            .range(start..)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n");
        Some(joined)
    }
}
