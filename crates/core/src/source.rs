// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event source definitions as handed to a host engine
//!
//! These are the normalized forms: every field is filled in and checked.
//! User-facing requests with optional fields live in the script layer.

use crate::flags::SourceFlags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A creation request that cannot be turned into a source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("empty pattern not allowed when creating {0}")]
    EmptyPattern(SourceKind),
    #[error("empty {0} name not allowed")]
    EmptyName(SourceKind),
    #[error("match_lines must be at least 1")]
    ZeroMatchLines,
    #[error("{what} must be a positive number of seconds, got {value}")]
    NonPositiveDuration { what: &'static str, value: f64 },
    #[error("{what} of {value}s is shorter than one millisecond")]
    SubMillisecond { what: &'static str, value: f64 },
    #[error("invalid flags {0:#06x}")]
    InvalidFlags(u16),
}

/// Kind of event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Trigger,
    Alias,
    Timer,
}

impl SourceKind {
    /// Prefix used for generated names
    pub fn prefix(self) -> &'static str {
        match self {
            SourceKind::Trigger => "trigger",
            SourceKind::Alias => "alias",
            SourceKind::Timer => "timer",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Fields common to every kind of source spec
pub trait SourceSpec {
    const KIND: SourceKind;

    fn name(&self) -> &str;
    fn group(&self) -> &str;
    fn flags(&self) -> SourceFlags;
    fn flags_mut(&mut self) -> &mut SourceFlags;
}

macro_rules! impl_source_spec {
    ($ty:ty, $kind:expr) => {
        impl SourceSpec for $ty {
            const KIND: SourceKind = $kind;

            fn name(&self) -> &str {
                &self.name
            }

            fn group(&self) -> &str {
                &self.group
            }

            fn flags(&self) -> SourceFlags {
                self.flags
            }

            fn flags_mut(&mut self) -> &mut SourceFlags {
                &mut self.flags
            }
        }
    };
}

/// Pattern-matched source over incoming text lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub name: String,
    pub group: String,
    pub pattern: String,
    pub flags: SourceFlags,
    /// Number of trailing lines joined by `\n` before matching
    pub match_lines: u8,
}

/// Pattern-matched source over user commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSpec {
    pub name: String,
    pub group: String,
    pub pattern: String,
    pub flags: SourceFlags,
}

/// Time-driven source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSpec {
    pub name: String,
    pub group: String,
    /// Tick interval in milliseconds, always > 0
    pub interval_ms: u64,
    pub flags: SourceFlags,
}

impl TimerSpec {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl_source_spec!(TriggerSpec, SourceKind::Trigger);
impl_source_spec!(AliasSpec, SourceKind::Alias);
impl_source_spec!(TimerSpec, SourceKind::Timer);

/// Convert a user-facing duration in seconds to whole milliseconds.
///
/// `what` names the argument in the error (`"cadence"`, `"timeout"`).
pub fn seconds_to_millis(what: &'static str, seconds: f64) -> Result<u64, ValidationError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(ValidationError::NonPositiveDuration {
            what,
            value: seconds,
        });
    }
    let millis = (seconds * 1000.0).round();
    if millis < 1.0 {
        return Err(ValidationError::SubMillisecond {
            what,
            value: seconds,
        });
    }
    // Saturates for absurdly large values
    Ok(millis as u64)
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
