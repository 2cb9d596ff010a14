// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of pattern-matched sources (triggers and aliases)

use regex::Regex;
use snare_adapters::{HostError, RawCallback};
use snare_core::{Captures, SourceFlags, SourceSpec};
use std::collections::BTreeMap;

/// A registered source with its compiled pattern
pub(crate) struct Compiled<S> {
    pub(crate) spec: S,
    pub(crate) re: Regex,
    pub(crate) callback: RawCallback,
}

/// Sources kept in registration order, unique by name
pub(crate) struct PatternStore<S> {
    entries: Vec<Compiled<S>>,
}

impl<S: SourceSpec> PatternStore<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a source, failing on a name already in use
    pub(crate) fn add(&mut self, compiled: Compiled<S>) -> Result<(), HostError> {
        if self.contains(compiled.spec.name()) {
            return Err(HostError::Duplicate {
                kind: S::KIND,
                name: compiled.spec.name().to_string(),
            });
        }
        self.entries.push(compiled);
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.spec.name() == name)
    }

    /// Remove a source; returns whether it existed
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.spec.name() != name);
        self.entries.len() != before
    }

    pub(crate) fn enable(&mut self, name: &str, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.spec.name() == name) {
            Some(entry) => {
                entry.spec.flags_mut().set(SourceFlags::ENABLED, enabled);
                true
            }
            None => false,
        }
    }

    /// Toggle every source of a group; returns how many were touched
    pub(crate) fn enable_group(&mut self, group: &str, enabled: bool) -> usize {
        let mut n = 0;
        for entry in self.entries.iter_mut().filter(|e| e.spec.group() == group) {
            entry.spec.flags_mut().set(SourceFlags::ENABLED, enabled);
            n += 1;
        }
        n
    }

    pub(crate) fn enabled(&self) -> impl Iterator<Item = &Compiled<S>> {
        self.entries.iter().filter(|e| e.spec.flags().is_enabled())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Compile a source pattern.
///
/// Multi-line patterns get the `(?m)` flag so `^`/`$` anchor per line.
pub(crate) fn compile<S: SourceSpec>(
    spec: &S,
    pattern: &str,
    multiline: bool,
) -> Result<Regex, HostError> {
    let source = if multiline && !pattern.starts_with("(?m)") {
        format!("(?m){}", pattern)
    } else {
        pattern.to_string()
    };
    Regex::new(&source).map_err(|e| HostError::InvalidPattern {
        kind: S::KIND,
        name: spec.name().to_string(),
        message: e.to_string(),
    })
}

/// Collect positional and named groups of the first match in `text`
pub(crate) fn captures_of(re: &Regex, text: &str) -> Captures {
    let Some(caps) = re.captures(text) else {
        return Captures::default();
    };
    let groups = caps
        .iter()
        .map(|m| m.map(|m| m.as_str().to_string()))
        .collect();
    let named: BTreeMap<String, String> = re
        .capture_names()
        .flatten()
        .filter_map(|name| {
            caps.name(name)
                .map(|m| (name.to_string(), m.as_str().to_string()))
        })
        .collect();
    Captures::new(groups, named)
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;
