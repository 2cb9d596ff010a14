// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host engine adapter: the registries that own triggers, aliases and timers

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHost, HostCall};

use snare_core::{AliasSpec, Firing, SourceKind, TimerSpec, TriggerSpec};
use std::sync::Arc;
use thiserror::Error;

/// Errors from registering a source with the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("{kind} '{name}' already exists")]
    Duplicate { kind: SourceKind, name: String },
    #[error("invalid pattern for {kind} '{name}': {message}")]
    InvalidPattern {
        kind: SourceKind,
        name: String,
        message: String,
    },
    #[error("host rejected {kind} '{name}': {reason}")]
    Rejected {
        kind: SourceKind,
        name: String,
        reason: String,
    },
    #[error("no async runtime available to drive timers")]
    NoRuntime,
}

/// Errors returned by a callback into the host's dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    /// The task waiting on this source no longer exists
    #[error("failed to resume task waiting on '{name}'")]
    ResumeFailed { name: String },
    #[error("no async runtime available to start a task for '{name}'")]
    NoRuntime { name: String },
}

/// Callback the host invokes synchronously each time a source fires.
///
/// Hosts must not hold registry locks while invoking it: callbacks may
/// delete or create sources on the same host.
pub type RawCallback = Arc<dyn Fn(Firing) -> Result<(), CallbackError> + Send + Sync>;

/// Adapter for the host automation engine.
///
/// All operations are synchronous and never block. Deletes are idempotent:
/// removing a name that does not exist (or was already removed after a
/// one-shot fire) is a no-op.
pub trait HostEngine: Clone + Send + Sync + 'static {
    /// Register a trigger
    fn create_trigger(&self, spec: TriggerSpec, callback: RawCallback) -> Result<(), HostError>;

    /// Remove a trigger by name
    fn delete_trigger(&self, name: &str);

    /// Toggle the enabled bit of every trigger in a group
    fn enable_trigger_group(&self, group: &str, enabled: bool);

    /// Register an alias
    fn create_alias(&self, spec: AliasSpec, callback: RawCallback) -> Result<(), HostError>;

    /// Remove an alias by name
    fn delete_alias(&self, name: &str);

    /// Toggle the enabled bit of every alias in a group
    fn enable_alias_group(&self, group: &str, enabled: bool);

    /// Register a timer
    fn create_timer(&self, spec: TimerSpec, callback: RawCallback) -> Result<(), HostError>;

    /// Remove a timer by name
    fn delete_timer(&self, name: &str);

    /// Toggle the enabled bit of every timer in a group
    fn enable_timer_group(&self, group: &str, enabled: bool);
}
