// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! snare-core: data model shared by the automation layer and its hosts
//!
//! This crate provides:
//! - Event source definitions (triggers, aliases, timers) and their flags
//! - The firing payload handed to callbacks
//! - ID generation abstractions
//! - TOML-backed configuration

pub mod config;
pub mod firing;
pub mod flags;
pub mod id;
pub mod source;

// Re-exports
pub use config::{AutomationConfig, Config, ConfigError, HostConfig};
pub use firing::{Captures, Firing, InlineStyle, Style};
pub use flags::SourceFlags;
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use source::{
    seconds_to_millis, AliasSpec, SourceKind, SourceSpec, TimerSpec, TriggerSpec,
    ValidationError,
};
