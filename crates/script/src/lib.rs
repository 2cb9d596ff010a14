// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! snare-script: the scripting surface over a host engine
//!
//! This crate provides:
//! - Validated, default-filling creation of triggers, aliases and timers
//! - Handlers that run as independent suspendable tasks
//! - `wait_time` and `wait_pattern`, which suspend the calling task until a
//!   timer fires or a line matches

pub mod adapter;
pub mod error;
pub mod registration;
pub mod task;
pub mod wait;

pub use adapter::{CallbackAdapter, Handler};
pub use error::ScriptError;
pub use registration::{AliasConfig, Automation, TimerConfig, TriggerConfig};
pub use task::TaskContext;
pub use wait::WaitOutcome;
