// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Results of feeding text through the host

use snare_adapters::CallbackError;

/// Outcome of one incoming line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineDispatch {
    /// Triggers whose callback ran, in registration order
    pub fired: Vec<String>,
    /// Errors returned by those callbacks
    pub failures: Vec<CallbackError>,
}

impl LineDispatch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the fired triggers, or the first callback failure
    pub fn into_result(self) -> Result<Vec<String>, CallbackError> {
        match self.failures.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(self.fired),
        }
    }
}

/// Outcome of one line of user input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDispatch {
    /// Commands no alias claimed, to be sent on as-is
    pub commands: Vec<String>,
    /// Aliases whose callback ran
    pub fired: Vec<String>,
    pub failures: Vec<CallbackError>,
}

impl InputDispatch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
