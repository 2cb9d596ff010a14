// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Creation, deletion and group toggling of event sources
//!
//! Requests carry optional fields; [`Automation`] validates them, fills in
//! names, groups and flags, then hands the normalized spec to the host.

use crate::adapter::{CallbackAdapter, Handler};
use crate::error::ScriptError;
use crate::task::{self, TaskContext};
use snare_adapters::{HostEngine, RawCallback};
use snare_core::{
    seconds_to_millis, AliasSpec, AutomationConfig, IdGen, SourceFlags, SourceKind, TimerSpec,
    TriggerSpec, ValidationError,
};
use std::future::Future;
use tokio::task::JoinHandle;

/// Request to create a trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerConfig {
    pub name: Option<String>,
    pub group: Option<String>,
    pub pattern: String,
    /// Trailing lines matched at once; defaults to 1
    pub match_lines: Option<u8>,
    /// Raw flag bits; replaces the entry point's default flags
    pub flags: Option<u16>,
}

impl TriggerConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn match_lines(mut self, lines: u8) -> Self {
        self.match_lines = Some(lines);
        self
    }

    pub fn flags(mut self, bits: u16) -> Self {
        self.flags = Some(bits);
        self
    }
}

/// Request to create an alias
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasConfig {
    pub name: Option<String>,
    pub group: Option<String>,
    pub pattern: String,
    pub flags: Option<u16>,
}

impl AliasConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn flags(mut self, bits: u16) -> Self {
        self.flags = Some(bits);
        self
    }
}

/// Request to create a timer
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    pub name: Option<String>,
    pub group: Option<String>,
    /// Cadence in seconds
    pub seconds: f64,
    pub flags: Option<u16>,
}

impl TimerConfig {
    pub fn new(seconds: f64) -> Self {
        Self {
            name: None,
            group: None,
            seconds,
            flags: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn flags(mut self, bits: u16) -> Self {
        self.flags = Some(bits);
        self
    }
}

/// Script-facing automation surface over a host engine.
///
/// Cloning is cheap; clones share the host and id generator, so handlers
/// can capture a clone and create sources or wait from inside a task.
#[derive(Clone)]
pub struct Automation<H, I> {
    pub(crate) host: H,
    pub(crate) ids: I,
    adapter: CallbackAdapter<I>,
    pub(crate) config: AutomationConfig,
}

impl<H: HostEngine, I: IdGen> Automation<H, I> {
    pub fn new(host: H, ids: I, config: AutomationConfig) -> Self {
        let adapter = CallbackAdapter::new(ids.clone());
        Self {
            host,
            ids,
            adapter,
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &AutomationConfig {
        &self.config
    }

    /// Spawn `fut` as a script task, so it may suspend on waits.
    ///
    /// Fails with [`ScriptError::NoRuntime`] outside a tokio runtime.
    pub fn spawn<F>(&self, fut: F) -> Result<JoinHandle<F::Output>, ScriptError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| ScriptError::NoRuntime)?;
        let ctx = TaskContext::new(self.ids.next_for("task"));
        tracing::debug!(task = ctx.id(), "spawning script task");
        Ok(task::spawn_on(&handle, ctx, fut))
    }

    // -- triggers --

    /// Create a trigger and return its name
    pub fn create_trigger(
        &self,
        config: TriggerConfig,
        handler: impl Handler,
    ) -> Result<String, ScriptError> {
        let spec = self.trigger_spec(config, SourceFlags::enabled())?;
        self.arm_trigger(spec, self.adapter.wrap(handler))
    }

    /// Create a trigger that is removed after its first firing
    pub fn create_oneshot_trigger(
        &self,
        config: TriggerConfig,
        handler: impl Handler,
    ) -> Result<String, ScriptError> {
        let spec = self.trigger_spec(config, SourceFlags::oneshot())?;
        self.arm_trigger(spec, self.adapter.wrap(handler))
    }

    pub fn delete_trigger(&self, name: &str) -> Result<(), ScriptError> {
        require_name(SourceKind::Trigger, name)?;
        self.host.delete_trigger(name);
        Ok(())
    }

    pub fn enable_trigger_group(&self, group: &str, enabled: bool) {
        self.host.enable_trigger_group(group, enabled);
    }

    pub(crate) fn trigger_spec(
        &self,
        config: TriggerConfig,
        flags: SourceFlags,
    ) -> Result<TriggerSpec, ScriptError> {
        if config.pattern.is_empty() {
            return Err(ValidationError::EmptyPattern(SourceKind::Trigger).into());
        }
        let match_lines = config.match_lines.unwrap_or(1);
        if match_lines == 0 {
            return Err(ValidationError::ZeroMatchLines.into());
        }
        let flags = resolve_flags(config.flags, flags)?;
        Ok(TriggerSpec {
            name: self.name_or_next(SourceKind::Trigger, config.name)?,
            group: self.group_or_default(config.group),
            pattern: config.pattern,
            flags,
            match_lines,
        })
    }

    pub(crate) fn arm_trigger(
        &self,
        spec: TriggerSpec,
        callback: RawCallback,
    ) -> Result<String, ScriptError> {
        let name = spec.name.clone();
        tracing::debug!(trigger = %name, flags = ?spec.flags, "creating trigger");
        self.host.create_trigger(spec, callback)?;
        Ok(name)
    }

    // -- aliases --

    /// Create an alias and return its name
    pub fn create_alias(
        &self,
        config: AliasConfig,
        handler: impl Handler,
    ) -> Result<String, ScriptError> {
        if config.pattern.is_empty() {
            return Err(ValidationError::EmptyPattern(SourceKind::Alias).into());
        }
        let flags = resolve_flags(config.flags, SourceFlags::enabled())?;
        let spec = AliasSpec {
            name: self.name_or_next(SourceKind::Alias, config.name)?,
            group: self.group_or_default(config.group),
            pattern: config.pattern,
            flags,
        };
        let name = spec.name.clone();
        tracing::debug!(alias = %name, "creating alias");
        self.host.create_alias(spec, self.adapter.wrap(handler))?;
        Ok(name)
    }

    pub fn delete_alias(&self, name: &str) -> Result<(), ScriptError> {
        require_name(SourceKind::Alias, name)?;
        self.host.delete_alias(name);
        Ok(())
    }

    pub fn enable_alias_group(&self, group: &str, enabled: bool) {
        self.host.enable_alias_group(group, enabled);
    }

    // -- timers --

    /// Create a periodic timer and return its name
    pub fn create_timer(
        &self,
        config: TimerConfig,
        handler: impl Handler,
    ) -> Result<String, ScriptError> {
        let spec = self.timer_spec(config, SourceFlags::enabled())?;
        self.arm_timer(spec, self.adapter.wrap(handler))
    }

    /// Create a timer that is removed after its first firing
    pub fn create_oneshot_timer(
        &self,
        config: TimerConfig,
        handler: impl Handler,
    ) -> Result<String, ScriptError> {
        let spec = self.timer_spec(config, SourceFlags::oneshot())?;
        self.arm_timer(spec, self.adapter.wrap(handler))
    }

    pub fn delete_timer(&self, name: &str) -> Result<(), ScriptError> {
        require_name(SourceKind::Timer, name)?;
        self.host.delete_timer(name);
        Ok(())
    }

    pub fn enable_timer_group(&self, group: &str, enabled: bool) {
        self.host.enable_timer_group(group, enabled);
    }

    pub(crate) fn timer_spec(
        &self,
        config: TimerConfig,
        flags: SourceFlags,
    ) -> Result<TimerSpec, ScriptError> {
        let interval_ms = seconds_to_millis("cadence", config.seconds)?;
        let flags = resolve_flags(config.flags, flags)?;
        Ok(TimerSpec {
            name: self.name_or_next(SourceKind::Timer, config.name)?,
            group: self.group_or_default(config.group),
            interval_ms,
            flags,
        })
    }

    pub(crate) fn arm_timer(
        &self,
        spec: TimerSpec,
        callback: RawCallback,
    ) -> Result<String, ScriptError> {
        let name = spec.name.clone();
        tracing::debug!(timer = %name, interval_ms = spec.interval_ms, flags = ?spec.flags, "creating timer");
        self.host.create_timer(spec, callback)?;
        Ok(name)
    }

    // -- defaults --

    fn name_or_next(&self, kind: SourceKind, name: Option<String>) -> Result<String, ScriptError> {
        match name {
            Some(name) if name.is_empty() => Err(ValidationError::EmptyName(kind).into()),
            Some(name) => Ok(name),
            None => Ok(self.ids.next_for(kind.prefix())),
        }
    }

    fn group_or_default(&self, group: Option<String>) -> String {
        group.unwrap_or_else(|| self.config.default_group.clone())
    }
}

/// Raw bits replace `base`; a one-shot entry point keeps its one-shot bit
fn resolve_flags(raw: Option<u16>, base: SourceFlags) -> Result<SourceFlags, ValidationError> {
    let Some(bits) = raw else {
        return Ok(base);
    };
    let flags = SourceFlags::from_bits(bits).ok_or(ValidationError::InvalidFlags(bits))?;
    Ok(flags | (base & SourceFlags::ONESHOT))
}

fn require_name(kind: SourceKind, name: &str) -> Result<(), ScriptError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName(kind).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
