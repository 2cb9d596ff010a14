// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suspending waits on timers and pattern matches
//!
//! A wait arms one-shot sources in the wait group and parks the calling
//! task on a oneshot channel. The first source to fire claims the
//! [`ResumeSlot`], cancels its sibling, and resumes the task. When the wait
//! ends, for whatever reason, [`ArmedSources`] deletes everything it armed.

use crate::error::ScriptError;
use crate::registration::{Automation, TriggerConfig};
use crate::task;
use snare_adapters::{CallbackError, HostEngine, RawCallback};
use snare_core::{
    seconds_to_millis, Firing, IdGen, SourceFlags, SourceKind, TimerSpec, ValidationError,
};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// How a pattern wait ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The pattern matched; carries the trigger's firing
    Matched(Firing),
    TimedOut,
}

impl WaitOutcome {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitOutcome::TimedOut)
    }

    pub fn into_firing(self) -> Option<Firing> {
        match self {
            WaitOutcome::Matched(firing) => Some(firing),
            WaitOutcome::TimedOut => None,
        }
    }
}

/// Resume handle shared by the sources of one wait; taken at most once
pub(crate) struct ResumeSlot<T> {
    tx: Mutex<Option<oneshot::Sender<T>>>,
}

impl<T> ResumeSlot<T> {
    pub(crate) fn new() -> (Arc<Self>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let slot = Self {
            tx: Mutex::new(Some(tx)),
        };
        (Arc::new(slot), rx)
    }

    /// Claim the right to resume; `None` once another source claimed it
    pub(crate) fn claim(&self) -> Option<oneshot::Sender<T>> {
        self.tx.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// Deliver `value` to the waiting task
pub(crate) fn resume<T>(tx: oneshot::Sender<T>, value: T, source: &str) -> Result<(), CallbackError> {
    tx.send(value).map_err(|_| {
        tracing::warn!(source, "waiting task is gone");
        CallbackError::ResumeFailed {
            name: source.to_string(),
        }
    })
}

/// Names armed by one wait, deleted from the host on drop
pub(crate) struct ArmedSources<H: HostEngine> {
    host: H,
    trigger: Option<String>,
    timer: Option<String>,
}

impl<H: HostEngine> ArmedSources<H> {
    pub(crate) fn new(host: H) -> Self {
        Self {
            host,
            trigger: None,
            timer: None,
        }
    }
}

impl<H: HostEngine> Drop for ArmedSources<H> {
    fn drop(&mut self) {
        if let Some(name) = self.trigger.take() {
            self.host.delete_trigger(&name);
        }
        if let Some(name) = self.timer.take() {
            self.host.delete_timer(&name);
        }
    }
}

impl<H: HostEngine, I: IdGen> Automation<H, I> {
    /// Suspend the current task for `seconds`.
    ///
    /// Must run inside a script task; see [`Automation::spawn`].
    pub async fn wait_time(&self, seconds: f64) -> Result<(), ScriptError> {
        let ctx = task::current()?;
        let interval_ms = seconds_to_millis("wait time", seconds)?;
        let name = self.ids.next_for(SourceKind::Timer.prefix());

        let (slot, rx) = ResumeSlot::new();
        let on_tick: RawCallback = {
            let name = name.clone();
            Arc::new(move |_: Firing| match slot.claim() {
                Some(tx) => resume(tx, (), &name),
                None => Ok(()),
            })
        };

        let mut armed = ArmedSources::new(self.host.clone());
        self.arm_timer(self.wait_timer(&name, interval_ms), on_tick)?;
        armed.timer = Some(name.clone());

        tracing::debug!(task = ctx.id(), timer = %name, interval_ms, "waiting on timer");
        let resumed = rx.await;
        drop(armed);
        resumed.map_err(|_| ScriptError::Abandoned { name })
    }

    /// Suspend the current task until a line matches `pattern`, or until
    /// `timeout` seconds pass.
    ///
    /// Without a timeout the wait can last forever.
    pub async fn wait_pattern(
        &self,
        pattern: &str,
        timeout: Option<f64>,
    ) -> Result<WaitOutcome, ScriptError> {
        let ctx = task::current()?;
        if pattern.is_empty() {
            return Err(ValidationError::EmptyPattern(SourceKind::Trigger).into());
        }
        let timeout_ms = timeout
            .map(|seconds| seconds_to_millis("timeout", seconds))
            .transpose()?;

        let trigger = self.ids.next_for(SourceKind::Trigger.prefix());
        let timer = timeout_ms.map(|_| self.ids.next_for(SourceKind::Timer.prefix()));
        let (slot, rx) = ResumeSlot::new();

        let on_match: RawCallback = {
            let slot = Arc::clone(&slot);
            let host = self.host.clone();
            let trigger = trigger.clone();
            let timer = timer.clone();
            Arc::new(move |firing: Firing| {
                let Some(tx) = slot.claim() else {
                    return Ok(());
                };
                if let Some(timer) = &timer {
                    host.delete_timer(timer);
                }
                resume(tx, WaitOutcome::Matched(firing), &trigger)
            })
        };

        let mut armed = ArmedSources::new(self.host.clone());
        let spec = self.trigger_spec(
            TriggerConfig::new(pattern)
                .name(trigger.as_str())
                .group(self.config.wait_group.as_str()),
            SourceFlags::oneshot(),
        )?;
        self.arm_trigger(spec, on_match)?;
        armed.trigger = Some(trigger.clone());

        if let (Some(timer), Some(interval_ms)) = (&timer, timeout_ms) {
            let on_timeout: RawCallback = {
                let slot = Arc::clone(&slot);
                let host = self.host.clone();
                let trigger = trigger.clone();
                let timer = timer.clone();
                Arc::new(move |_: Firing| {
                    let Some(tx) = slot.claim() else {
                        return Ok(());
                    };
                    host.delete_trigger(&trigger);
                    resume(tx, WaitOutcome::TimedOut, &timer)
                })
            };
            // On failure `armed` drops here and takes the trigger with it
            self.arm_timer(self.wait_timer(timer, interval_ms), on_timeout)?;
            armed.timer = Some(timer.clone());
        }

        // Only the armed callbacks may keep the sender alive
        drop(slot);
        tracing::debug!(task = ctx.id(), trigger = %trigger, ?timeout_ms, "waiting on pattern");
        tracing::trace!(pattern);
        let outcome = rx.await;
        drop(armed);
        let outcome = outcome.map_err(|_| ScriptError::Abandoned { name: trigger })?;
        tracing::debug!(task = ctx.id(), timed_out = outcome.is_timeout(), "pattern wait resumed");
        Ok(outcome)
    }

    fn wait_timer(&self, name: &str, interval_ms: u64) -> TimerSpec {
        TimerSpec {
            name: name.to_string(),
            group: self.config.wait_group.clone(),
            interval_ms,
            flags: SourceFlags::oneshot(),
        }
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
