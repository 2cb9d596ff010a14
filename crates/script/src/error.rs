// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script-facing errors

use snare_adapters::HostError;
use snare_core::ValidationError;
use thiserror::Error;

/// Errors from the script surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("must be called within a suspendable task")]
    Context,
    #[error(transparent)]
    Registration(#[from] HostError),
    #[error("no async runtime available to start a script task")]
    NoRuntime,
    /// Every source armed by a wait went away without firing
    #[error("wait on '{name}' ended without any source firing")]
    Abandoned { name: String },
    #[error("handler failed: {0}")]
    Handler(String),
}

impl ScriptError {
    pub fn handler(message: impl Into<String>) -> Self {
        ScriptError::Handler(message.into())
    }
}
