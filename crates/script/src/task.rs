// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Suspendable task context
//!
//! A script task is a tokio task running inside a [`TaskContext`] scope.
//! Only code running in such a scope may suspend on a wait.

use crate::error::ScriptError;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Identity of the script task currently running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    id: String,
}

impl TaskContext {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

tokio::task_local! {
    static CONTEXT: TaskContext;
}

/// Context of the running task, or [`ScriptError::Context`] outside one
pub fn current() -> Result<TaskContext, ScriptError> {
    CONTEXT.try_with(Clone::clone).map_err(|_| ScriptError::Context)
}

pub fn in_task() -> bool {
    CONTEXT.try_with(|_| ()).is_ok()
}

/// Run `fut` inline with `ctx` as its task context
pub async fn scope<F: Future>(ctx: TaskContext, fut: F) -> F::Output {
    CONTEXT.scope(ctx, fut).await
}

/// Spawn `fut` as a new task on `handle` with `ctx` as its context
pub fn spawn_on<F>(handle: &Handle, ctx: TaskContext, fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    handle.spawn(CONTEXT.scope(ctx, fut))
}
