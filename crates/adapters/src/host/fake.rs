// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake host engine for testing
//!
//! Nothing matches or ticks on its own: tests fire sources by name.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CallbackError, HostEngine, HostError, RawCallback};
use snare_core::{
    AliasSpec, Captures, Firing, InlineStyle, SourceFlags, SourceSpec, TimerSpec, TriggerSpec,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Recorded host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateTrigger(TriggerSpec),
    DeleteTrigger(String),
    EnableTriggerGroup { group: String, enabled: bool },
    CreateAlias(AliasSpec),
    DeleteAlias(String),
    EnableAliasGroup { group: String, enabled: bool },
    CreateTimer(TimerSpec),
    DeleteTimer(String),
    EnableTimerGroup { group: String, enabled: bool },
}

struct Entry<S> {
    spec: S,
    callback: RawCallback,
}

struct Registry<S>(Vec<Entry<S>>);

impl<S> Default for Registry<S> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<S: SourceSpec + Clone> Registry<S> {
    fn add(&mut self, spec: S, callback: RawCallback) -> Result<(), HostError> {
        if self.get(spec.name()).is_some() {
            return Err(HostError::Duplicate {
                kind: S::KIND,
                name: spec.name().to_string(),
            });
        }
        self.0.push(Entry { spec, callback });
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&Entry<S>> {
        self.0.iter().find(|e| e.spec.name() == name)
    }

    fn remove(&mut self, name: &str) {
        self.0.retain(|e| e.spec.name() != name);
    }

    fn enable_group(&mut self, group: &str, enabled: bool) {
        for entry in self.0.iter_mut().filter(|e| e.spec.group() == group) {
            entry.spec.flags_mut().set(SourceFlags::ENABLED, enabled);
        }
    }

    /// Callback to run for a fire, removing one-shot sources first
    fn take_for_fire(&mut self, name: &str) -> Option<RawCallback> {
        let entry = self.get(name)?;
        if !entry.spec.flags().is_enabled() {
            return None;
        }
        let callback = Arc::clone(&entry.callback);
        if entry.spec.flags().is_oneshot() {
            self.remove(name);
        }
        Some(callback)
    }

    fn names(&self) -> Vec<String> {
        self.0.iter().map(|e| e.spec.name().to_string()).collect()
    }
}

#[derive(Default)]
struct FakeState {
    triggers: Registry<TriggerSpec>,
    aliases: Registry<AliasSpec>,
    timers: Registry<TimerSpec>,
    reject_next: Option<String>,
}

/// Fake host engine for testing
#[derive(Clone, Default)]
pub struct FakeHost {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make the next create call fail with [`HostError::Rejected`]
    pub fn reject_next(&self, reason: impl Into<String>) {
        self.state().reject_next = Some(reason.into());
    }

    pub fn trigger(&self, name: &str) -> Option<TriggerSpec> {
        self.state().triggers.get(name).map(|e| e.spec.clone())
    }

    pub fn alias(&self, name: &str) -> Option<AliasSpec> {
        self.state().aliases.get(name).map(|e| e.spec.clone())
    }

    pub fn timer(&self, name: &str) -> Option<TimerSpec> {
        self.state().timers.get(name).map(|e| e.spec.clone())
    }

    pub fn trigger_names(&self) -> Vec<String> {
        self.state().triggers.names()
    }

    pub fn alias_names(&self) -> Vec<String> {
        self.state().aliases.names()
    }

    pub fn timer_names(&self) -> Vec<String> {
        self.state().timers.names()
    }

    /// Total number of registered sources of every kind
    pub fn source_count(&self) -> usize {
        let state = self.state();
        state.triggers.0.len() + state.aliases.0.len() + state.timers.0.len()
    }

    /// Fire a trigger with `text` as the whole match.
    ///
    /// Returns `Ok(false)` when the trigger is unknown or disabled.
    pub fn fire_trigger(&self, name: &str, text: &str) -> Result<bool, CallbackError> {
        let captures = Captures::new(vec![Some(text.to_string())], BTreeMap::new());
        self.fire_trigger_with(Firing::trigger(name, text, captures, Vec::new()))
    }

    /// Fire a trigger with a fully specified payload
    pub fn fire_trigger_with(&self, firing: Firing) -> Result<bool, CallbackError> {
        let callback = self.state().triggers.take_for_fire(&firing.name);
        invoke(callback, firing)
    }

    /// Fire a trigger with styles attached to the matched line
    pub fn fire_styled_trigger(
        &self,
        name: &str,
        text: &str,
        styles: Vec<InlineStyle>,
    ) -> Result<bool, CallbackError> {
        let captures = Captures::new(vec![Some(text.to_string())], BTreeMap::new());
        self.fire_trigger_with(Firing::trigger(name, text, captures, styles))
    }

    pub fn fire_alias(&self, name: &str, text: &str) -> Result<bool, CallbackError> {
        let callback = self.state().aliases.take_for_fire(name);
        let captures = Captures::new(vec![Some(text.to_string())], BTreeMap::new());
        invoke(callback, Firing::alias(name, text, captures))
    }

    pub fn fire_timer(&self, name: &str) -> Result<bool, CallbackError> {
        let callback = self.state().timers.take_for_fire(name);
        invoke(callback, Firing::timer(name))
    }

    fn check_reject(&self, kind: snare_core::SourceKind, name: &str) -> Result<(), HostError> {
        match self.state().reject_next.take() {
            Some(reason) => Err(HostError::Rejected {
                kind,
                name: name.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

// State lock is released before the callback runs
fn invoke(callback: Option<RawCallback>, firing: Firing) -> Result<bool, CallbackError> {
    match callback {
        Some(callback) => callback(firing).map(|()| true),
        None => Ok(false),
    }
}

impl HostEngine for FakeHost {
    fn create_trigger(&self, spec: TriggerSpec, callback: RawCallback) -> Result<(), HostError> {
        self.record(HostCall::CreateTrigger(spec.clone()));
        self.check_reject(TriggerSpec::KIND, &spec.name)?;
        self.state().triggers.add(spec, callback)
    }

    fn delete_trigger(&self, name: &str) {
        self.record(HostCall::DeleteTrigger(name.to_string()));
        self.state().triggers.remove(name);
    }

    fn enable_trigger_group(&self, group: &str, enabled: bool) {
        self.record(HostCall::EnableTriggerGroup {
            group: group.to_string(),
            enabled,
        });
        self.state().triggers.enable_group(group, enabled);
    }

    fn create_alias(&self, spec: AliasSpec, callback: RawCallback) -> Result<(), HostError> {
        self.record(HostCall::CreateAlias(spec.clone()));
        self.check_reject(AliasSpec::KIND, &spec.name)?;
        self.state().aliases.add(spec, callback)
    }

    fn delete_alias(&self, name: &str) {
        self.record(HostCall::DeleteAlias(name.to_string()));
        self.state().aliases.remove(name);
    }

    fn enable_alias_group(&self, group: &str, enabled: bool) {
        self.record(HostCall::EnableAliasGroup {
            group: group.to_string(),
            enabled,
        });
        self.state().aliases.enable_group(group, enabled);
    }

    fn create_timer(&self, spec: TimerSpec, callback: RawCallback) -> Result<(), HostError> {
        self.record(HostCall::CreateTimer(spec.clone()));
        self.check_reject(TimerSpec::KIND, &spec.name)?;
        self.state().timers.add(spec, callback)
    }

    fn delete_timer(&self, name: &str) {
        self.record(HostCall::DeleteTimer(name.to_string()));
        self.state().timers.remove(name);
    }

    fn enable_timer_group(&self, group: &str, enabled: bool) {
        self.record(HostCall::EnableTimerGroup {
            group: group.to_string(),
            enabled,
        });
        self.state().timers.enable_group(group, enabled);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
