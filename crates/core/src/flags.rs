// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag set carried by every event source

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Independent on/off bits of an event source.
    ///
    /// Bit values match the host flag tables scripts already know
    /// (`Enabled = 1`, `OneShot = 32768`), so raw values coming from
    /// scripts can be checked with [`SourceFlags::from_bits`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SourceFlags: u16 {
        /// Source takes part in matching / ticking
        const ENABLED = 0x0001;
        /// Source is removed by the host after its first fire
        const ONESHOT = 0x8000;
    }
}

impl SourceFlags {
    /// Flags for a source created through the public entry points
    pub const fn enabled() -> Self {
        Self::ENABLED
    }

    /// Flags for a source that fires at most once
    pub const fn oneshot() -> Self {
        Self::ENABLED.union(Self::ONESHOT)
    }

    pub const fn is_enabled(self) -> bool {
        self.contains(Self::ENABLED)
    }

    pub const fn is_oneshot(self) -> bool {
        self.contains(Self::ONESHOT)
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
