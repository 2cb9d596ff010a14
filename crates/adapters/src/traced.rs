// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced host wrapper for consistent observability

use crate::host::{HostEngine, HostError, RawCallback};
use snare_core::{AliasSpec, Firing, SourceKind, TimerSpec, TriggerSpec};
use std::sync::Arc;

/// Wrapper that adds tracing to any HostEngine.
///
/// Registrations and removals get an `info_span!`; every firing of a
/// wrapped callback is logged, and failures are logged as warnings before
/// being handed back to the host.
#[derive(Clone)]
pub struct TracedHost<H> {
    inner: H,
}

impl<H> TracedHost<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

fn traced_callback(kind: SourceKind, callback: RawCallback) -> RawCallback {
    Arc::new(move |firing: Firing| {
        let span = tracing::debug_span!("host.fire", %kind, name = %firing.name);
        let _guard = span.enter();

        tracing::trace!(text = %firing.text, "firing");
        let result = callback(firing);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "callback failed");
        }
        result
    })
}

fn log_create(result: &Result<(), HostError>) {
    match result {
        Ok(()) => tracing::info!("registered"),
        Err(e) => tracing::error!(error = %e, "registration failed"),
    }
}

impl<H: HostEngine> HostEngine for TracedHost<H> {
    fn create_trigger(&self, spec: TriggerSpec, callback: RawCallback) -> Result<(), HostError> {
        let span = tracing::info_span!("host.create_trigger", name = %spec.name, group = %spec.group);
        let _guard = span.enter();

        tracing::debug!(
            pattern = %spec.pattern,
            flags = spec.flags.bits(),
            match_lines = spec.match_lines,
            "creating"
        );
        let result = self
            .inner
            .create_trigger(spec, traced_callback(SourceKind::Trigger, callback));
        log_create(&result);
        result
    }

    fn delete_trigger(&self, name: &str) {
        let span = tracing::info_span!("host.delete_trigger", name);
        let _guard = span.enter();

        self.inner.delete_trigger(name);
        tracing::debug!("deleted");
    }

    fn enable_trigger_group(&self, group: &str, enabled: bool) {
        let span = tracing::info_span!("host.enable_trigger_group", group, enabled);
        let _guard = span.enter();

        self.inner.enable_trigger_group(group, enabled);
    }

    fn create_alias(&self, spec: AliasSpec, callback: RawCallback) -> Result<(), HostError> {
        let span = tracing::info_span!("host.create_alias", name = %spec.name, group = %spec.group);
        let _guard = span.enter();

        tracing::debug!(pattern = %spec.pattern, flags = spec.flags.bits(), "creating");
        let result = self
            .inner
            .create_alias(spec, traced_callback(SourceKind::Alias, callback));
        log_create(&result);
        result
    }

    fn delete_alias(&self, name: &str) {
        let span = tracing::info_span!("host.delete_alias", name);
        let _guard = span.enter();

        self.inner.delete_alias(name);
        tracing::debug!("deleted");
    }

    fn enable_alias_group(&self, group: &str, enabled: bool) {
        let span = tracing::info_span!("host.enable_alias_group", group, enabled);
        let _guard = span.enter();

        self.inner.enable_alias_group(group, enabled);
    }

    fn create_timer(&self, spec: TimerSpec, callback: RawCallback) -> Result<(), HostError> {
        let span = tracing::info_span!("host.create_timer", name = %spec.name, group = %spec.group);
        let _guard = span.enter();

        tracing::debug!(
            interval_ms = spec.interval_ms,
            flags = spec.flags.bits(),
            "creating"
        );
        let result = self
            .inner
            .create_timer(spec, traced_callback(SourceKind::Timer, callback));
        log_create(&result);
        result
    }

    fn delete_timer(&self, name: &str) {
        let span = tracing::info_span!("host.delete_timer", name);
        let _guard = span.enter();

        self.inner.delete_timer(name);
        tracing::debug!("deleted");
    }

    fn enable_timer_group(&self, group: &str, enabled: bool) {
        let span = tracing::info_span!("host.enable_timer_group", group, enabled);
        let _guard = span.enter();

        self.inner.enable_timer_group(group, enabled);
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
