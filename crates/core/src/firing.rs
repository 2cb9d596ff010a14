// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload delivered to a callback when an event source fires

use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text style attributes of a run of characters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
}

/// Style starting at a byte offset of a line and running to the next one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineStyle {
    pub start: usize,
    pub style: Style,
}

impl InlineStyle {
    pub fn new(start: usize, style: Style) -> Self {
        Self { start, style }
    }
}

/// Capture groups of a pattern match.
///
/// Index 0 is the whole match. Groups that did not take part in the
/// match are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    groups: Vec<Option<String>>,
    named: BTreeMap<String, String>,
}

impl Captures {
    pub fn new(groups: Vec<Option<String>>, named: BTreeMap<String, String>) -> Self {
        Self { groups, named }
    }

    /// Positional group, `0` being the whole match
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Named group
    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// Number of positional slots, including the whole match
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One firing of an event source.
///
/// Triggers carry the matched line(s), captures and, for single-line
/// matches, inline styles. Aliases carry the command text and captures.
/// Timers carry only their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firing {
    pub kind: SourceKind,
    pub name: String,
    pub text: String,
    pub captures: Captures,
    pub styles: Vec<InlineStyle>,
}

impl Firing {
    pub fn trigger(
        name: impl Into<String>,
        text: impl Into<String>,
        captures: Captures,
        styles: Vec<InlineStyle>,
    ) -> Self {
        Self {
            kind: SourceKind::Trigger,
            name: name.into(),
            text: text.into(),
            captures,
            styles,
        }
    }

    pub fn alias(name: impl Into<String>, text: impl Into<String>, captures: Captures) -> Self {
        Self {
            kind: SourceKind::Alias,
            name: name.into(),
            text: text.into(),
            captures,
            styles: Vec::new(),
        }
    }

    pub fn timer(name: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Timer,
            name: name.into(),
            text: String::new(),
            captures: Captures::default(),
            styles: Vec::new(),
        }
    }
}
