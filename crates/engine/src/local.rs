// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory host engine

use crate::dispatch::{InputDispatch, LineDispatch};
use crate::lines::LineCache;
use crate::patterns::{captures_of, compile, Compiled, PatternStore};
use crate::timers::{self, TimerTable};
use snare_adapters::{HostEngine, HostError, RawCallback};
use snare_core::{
    AliasSpec, Firing, HostConfig, InlineStyle, SourceKind, TimerSpec, TriggerSpec,
};
use std::sync::{Arc, Mutex, MutexGuard};

struct Inner {
    config: HostConfig,
    lines: Mutex<LineCache>,
    triggers: Mutex<PatternStore<TriggerSpec>>,
    aliases: Mutex<PatternStore<AliasSpec>>,
    timers: Arc<Mutex<TimerTable>>,
}

/// Host engine keeping every registry in process.
///
/// Cloning is cheap and clones share state. Callbacks always run with no
/// registry lock held, so they may freely create and delete sources.
#[derive(Clone)]
pub struct LocalHost {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl LocalHost {
    pub fn new(config: HostConfig) -> Self {
        let lines = LineCache::new(usize::from(config.max_match_lines));
        Self {
            inner: Arc::new(Inner {
                config,
                lines: Mutex::new(lines),
                triggers: Mutex::new(PatternStore::new()),
                aliases: Mutex::new(PatternStore::new()),
                timers: Arc::new(Mutex::new(TimerTable::default())),
            }),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.inner.config
    }

    /// Feed one line of incoming text.
    ///
    /// Every enabled trigger matching the line (or, for multi-line
    /// triggers, the trailing lines) fires in registration order. One-shot
    /// triggers are removed before any callback runs.
    pub fn feed_line(&self, line: &str, styles: Vec<InlineStyle>) -> LineDispatch {
        let pending = {
            let mut lines = lock(&self.inner.lines);
            lines.push(line, styles);
            let mut triggers = lock(&self.inner.triggers);
            let pending = match_triggers(&lines, &triggers);
            for (_, firing) in &pending {
                if is_oneshot(&triggers, &firing.name) {
                    triggers.remove(&firing.name);
                }
            }
            pending
        };

        let mut dispatch = LineDispatch::default();
        for (callback, firing) in pending {
            let name = firing.name.clone();
            tracing::debug!(trigger = %name, "trigger matched");
            tracing::trace!(text = %firing.text, "matched text");
            if let Err(e) = callback(firing) {
                tracing::warn!(trigger = %name, error = %e, "trigger callback failed");
                dispatch.failures.push(e);
            }
            dispatch.fired.push(name);
        }
        dispatch
    }

    /// Feed one unstyled line of incoming text
    pub fn feed_plain(&self, line: &str) -> LineDispatch {
        self.feed_line(line, Vec::new())
    }

    /// Process one line of user input.
    ///
    /// The input is split on newlines and the command delimiter. Each
    /// command fires the first enabled alias matching it; commands no alias
    /// claims are returned for sending on.
    pub fn process_input(&self, input: &str) -> InputDispatch {
        let input = input
            .strip_suffix("\r\n")
            .or_else(|| input.strip_suffix('\n'))
            .unwrap_or(input);
        let mut dispatch = InputDispatch::default();
        let delimiter = self.inner.config.command_delimiter;
        let keep_empty = self.inner.config.send_empty_commands;
        for cmd in input
            .split(|c| c == '\n' || c == delimiter)
            .filter(|cmd| keep_empty || !cmd.is_empty())
        {
            if cmd.is_empty() {
                dispatch.commands.push(String::new());
                continue;
            }
            match self.match_alias(cmd) {
                Some((callback, firing)) => {
                    let name = firing.name.clone();
                    tracing::debug!(alias = %name, "alias matched");
                    if let Err(e) = callback(firing) {
                        tracing::warn!(alias = %name, error = %e, "alias callback failed");
                        dispatch.failures.push(e);
                    }
                    dispatch.fired.push(name);
                }
                None => dispatch.commands.push(cmd.to_string()),
            }
        }
        // Nothing left after splitting still sends one empty line
        if dispatch.commands.is_empty() && dispatch.fired.is_empty() {
            dispatch.commands.push(String::new());
        }
        dispatch
    }

    fn match_alias(&self, cmd: &str) -> Option<(RawCallback, Firing)> {
        let mut aliases = lock(&self.inner.aliases);
        let entry = aliases.enabled().find(|e| e.re.is_match(cmd))?;
        let firing = Firing::alias(&entry.spec.name, cmd, captures_of(&entry.re, cmd));
        let callback = Arc::clone(&entry.callback);
        if entry.spec.flags.is_oneshot() {
            let name = entry.spec.name.clone();
            aliases.remove(&name);
        }
        Some((callback, firing))
    }

    /// Toggle a single trigger; returns whether it exists
    pub fn enable_trigger(&self, name: &str, enabled: bool) -> bool {
        lock(&self.inner.triggers).enable(name, enabled)
    }

    /// Toggle a single alias; returns whether it exists
    pub fn enable_alias(&self, name: &str, enabled: bool) -> bool {
        lock(&self.inner.aliases).enable(name, enabled)
    }

    /// Toggle a single timer; returns whether it exists
    pub fn enable_timer(&self, name: &str, enabled: bool) -> bool {
        lock(&self.inner.timers).enable(name, enabled)
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        lock(&self.inner.triggers).contains(name)
    }

    pub fn has_alias(&self, name: &str) -> bool {
        lock(&self.inner.aliases).contains(name)
    }

    pub fn has_timer(&self, name: &str) -> bool {
        lock(&self.inner.timers).contains(name)
    }

    pub fn trigger_count(&self) -> usize {
        lock(&self.inner.triggers).len()
    }

    pub fn alias_count(&self) -> usize {
        lock(&self.inner.aliases).len()
    }

    pub fn timer_count(&self) -> usize {
        lock(&self.inner.timers).len()
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

fn is_oneshot(store: &PatternStore<TriggerSpec>, name: &str) -> bool {
    store
        .enabled()
        .any(|e| e.spec.name == name && e.spec.flags.is_oneshot())
}

fn match_triggers(
    lines: &LineCache,
    triggers: &PatternStore<TriggerSpec>,
) -> Vec<(RawCallback, Firing)> {
    triggers
        .enabled()
        .filter_map(|entry| match_trigger(lines, entry))
        .collect()
}

fn match_trigger(
    lines: &LineCache,
    entry: &Compiled<TriggerSpec>,
) -> Option<(RawCallback, Firing)> {
    let (text, styles) = if entry.spec.match_lines > 1 {
        // Styles are only tracked for the newest line
        (lines.last_n(usize::from(entry.spec.match_lines))?, Vec::new())
    } else {
        let (line, styles) = lines.last()?;
        (line.to_string(), styles.to_vec())
    };
    if !entry.re.is_match(&text) {
        return None;
    }
    let captures = captures_of(&entry.re, &text);
    let firing = Firing::trigger(&entry.spec.name, text, captures, styles);
    Some((Arc::clone(&entry.callback), firing))
}

impl HostEngine for LocalHost {
    fn create_trigger(&self, spec: TriggerSpec, callback: RawCallback) -> Result<(), HostError> {
        let capacity = lock(&self.inner.lines).capacity();
        if spec.match_lines == 0 || usize::from(spec.match_lines) > capacity {
            return Err(HostError::Rejected {
                kind: SourceKind::Trigger,
                name: spec.name,
                reason: format!("match_lines must be between 1 and {}", capacity),
            });
        }
        let re = compile(&spec, &spec.pattern, spec.match_lines > 1)?;
        tracing::debug!(trigger = %spec.name, group = %spec.group, "creating trigger");
        tracing::trace!(pattern = %spec.pattern);
        lock(&self.inner.triggers).add(Compiled { spec, re, callback })
    }

    fn delete_trigger(&self, name: &str) {
        if lock(&self.inner.triggers).remove(name) {
            tracing::debug!(trigger = %name, "deleted trigger");
        }
    }

    fn enable_trigger_group(&self, group: &str, enabled: bool) {
        let n = lock(&self.inner.triggers).enable_group(group, enabled);
        tracing::debug!(group, enabled, affected = n, "toggled trigger group");
    }

    fn create_alias(&self, spec: AliasSpec, callback: RawCallback) -> Result<(), HostError> {
        let re = compile(&spec, &spec.pattern, false)?;
        tracing::debug!(alias = %spec.name, group = %spec.group, "creating alias");
        tracing::trace!(pattern = %spec.pattern);
        lock(&self.inner.aliases).add(Compiled { spec, re, callback })
    }

    fn delete_alias(&self, name: &str) {
        if lock(&self.inner.aliases).remove(name) {
            tracing::debug!(alias = %name, "deleted alias");
        }
    }

    fn enable_alias_group(&self, group: &str, enabled: bool) {
        let n = lock(&self.inner.aliases).enable_group(group, enabled);
        tracing::debug!(group, enabled, affected = n, "toggled alias group");
    }

    fn create_timer(&self, spec: TimerSpec, callback: RawCallback) -> Result<(), HostError> {
        if spec.interval_ms == 0 {
            return Err(HostError::Rejected {
                kind: SourceKind::Timer,
                name: spec.name,
                reason: "interval must be positive".to_string(),
            });
        }
        tracing::debug!(timer = %spec.name, interval_ms = spec.interval_ms, "creating timer");
        timers::start(&self.inner.timers, spec, callback)
    }

    fn delete_timer(&self, name: &str) {
        if lock(&self.inner.timers).remove(name) {
            tracing::debug!(timer = %name, "deleted timer");
        }
    }

    fn enable_timer_group(&self, group: &str, enabled: bool) {
        let n = lock(&self.inner.timers).enable_group(group, enabled);
        tracing::debug!(group, enabled, affected = n, "toggled timer group");
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
