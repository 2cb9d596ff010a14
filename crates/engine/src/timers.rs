// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer registry and the tokio tasks that drive it

use snare_adapters::{HostError, RawCallback};
use snare_core::{Firing, SourceFlags, SourceKind, TimerSpec};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

struct TimerEntry {
    spec: TimerSpec,
    callback: RawCallback,
    /// Distinguishes this registration from an earlier one of the same name
    generation: u64,
    driver: AbortHandle,
}

/// What a driver should do on a tick
pub(crate) enum Tick {
    /// Timer was deleted or replaced; the driver stops
    Gone,
    /// Timer is disabled; wait for the next tick
    Skip,
    Fire { callback: RawCallback, last: bool },
}

#[derive(Default)]
pub(crate) struct TimerTable {
    entries: HashMap<String, TimerEntry>,
    next_generation: u64,
}

impl TimerTable {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub(crate) fn insert(
        &mut self,
        spec: TimerSpec,
        callback: RawCallback,
        generation: u64,
        driver: AbortHandle,
    ) {
        self.entries.insert(
            spec.name.clone(),
            TimerEntry {
                spec,
                callback,
                generation,
                driver,
            },
        );
    }

    /// Remove a timer and stop its driver; returns whether it existed
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(entry) => {
                entry.driver.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn enable(&mut self, name: &str, enabled: bool) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.spec.flags.set(SourceFlags::ENABLED, enabled);
                true
            }
            None => false,
        }
    }

    pub(crate) fn enable_group(&mut self, group: &str, enabled: bool) -> usize {
        let mut n = 0;
        for entry in self.entries.values_mut().filter(|e| e.spec.group == group) {
            entry.spec.flags.set(SourceFlags::ENABLED, enabled);
            n += 1;
        }
        n
    }

    /// Resolve a tick of the driver for `(name, generation)`.
    ///
    /// One-shot timers leave the table here, before their callback runs.
    pub(crate) fn tick(&mut self, name: &str, generation: u64) -> Tick {
        let Some(entry) = self.entries.get(name) else {
            return Tick::Gone;
        };
        if entry.generation != generation {
            return Tick::Gone;
        }
        if !entry.spec.flags.is_enabled() {
            return Tick::Skip;
        }
        let callback = RawCallback::clone(&entry.callback);
        let last = entry.spec.flags.is_oneshot();
        if last {
            // The driver is the caller, so it is not aborted
            self.entries.remove(name);
        }
        Tick::Fire { callback, last }
    }
}

/// Drive one registered timer until it is removed.
///
/// Holds the table weakly so dropping the host stops every driver.
pub(crate) async fn drive(
    table: Weak<Mutex<TimerTable>>,
    name: String,
    generation: u64,
    interval: Duration,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(strong) = table.upgrade() else {
            return;
        };
        let tick = strong
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .tick(&name, generation);
        drop(strong);

        match tick {
            Tick::Gone => return,
            Tick::Skip => continue,
            Tick::Fire { callback, last } => {
                tracing::debug!(timer = %name, "timer fired");
                if let Err(e) = callback(Firing::timer(&name)) {
                    tracing::error!(timer = %name, error = %e, "timer callback failed");
                }
                if last {
                    return;
                }
            }
        }
    }
}

/// Register a timer and spawn its driver on the current runtime
pub(crate) fn start(
    table: &Arc<Mutex<TimerTable>>,
    spec: TimerSpec,
    callback: RawCallback,
) -> Result<(), HostError> {
    let handle = tokio::runtime::Handle::try_current().map_err(|_| HostError::NoRuntime)?;
    let mut guard = table.lock().unwrap_or_else(|e| e.into_inner());
    if guard.contains(&spec.name) {
        return Err(HostError::Duplicate {
            kind: SourceKind::Timer,
            name: spec.name,
        });
    }
    let generation = guard.next_generation();
    let driver = handle.spawn(drive(
        Arc::downgrade(table),
        spec.name.clone(),
        generation,
        spec.interval(),
    ));
    guard.insert(spec, callback, generation, driver.abort_handle());
    Ok(())
}

#[cfg(test)]
#[path = "timers_tests.rs"]
mod tests;
