// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-process host engine
//!
//! `LocalHost` keeps trigger, alias and timer registries in memory,
//! matches incoming lines and user input with `regex`, and drives timers
//! with `tokio::time`.

mod dispatch;
mod lines;
mod local;
mod patterns;
mod timers;

pub use dispatch::{InputDispatch, LineDispatch};
pub use local::LocalHost;
