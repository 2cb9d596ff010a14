// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns script handlers into host callbacks
//!
//! Each firing runs the handler as its own task, so a handler may suspend
//! on a wait, and a failing or panicking handler affects only the firing
//! that started it.

use crate::error::ScriptError;
use crate::task::{self, TaskContext};
use async_trait::async_trait;
use snare_adapters::{CallbackError, RawCallback};
use snare_core::{Firing, IdGen};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Script code run each time a source fires
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn call(&self, firing: Firing) -> Result<(), ScriptError>;
}

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Firing) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ScriptError>> + Send + 'static,
{
    async fn call(&self, firing: Firing) -> Result<(), ScriptError> {
        (self)(firing).await
    }
}

/// Wraps handlers as [`RawCallback`]s
#[derive(Clone)]
pub struct CallbackAdapter<I> {
    ids: I,
}

impl<I: IdGen> CallbackAdapter<I> {
    pub fn new(ids: I) -> Self {
        Self { ids }
    }

    /// Wrap `handler` so every invocation starts a new task.
    ///
    /// The returned callback never waits for the task. It fails only when
    /// there is no runtime to spawn onto.
    pub fn wrap(&self, handler: impl Handler) -> RawCallback {
        let handler: Arc<dyn Handler> = Arc::new(handler);
        let ids = self.ids.clone();
        Arc::new(move |firing: Firing| {
            let handle = Handle::try_current().map_err(|_| CallbackError::NoRuntime {
                name: firing.name.clone(),
            })?;
            let ctx = TaskContext::new(ids.next_for("task"));
            spawn_supervised(&handle, ctx, Arc::clone(&handler), firing);
            Ok(())
        })
    }
}

/// Run one handler invocation and log how it ended
fn spawn_supervised(handle: &Handle, ctx: TaskContext, handler: Arc<dyn Handler>, firing: Firing) {
    let task_id = ctx.id().to_string();
    let source = firing.name.clone();
    tracing::trace!(task = %task_id, source = %source, "starting handler task");
    let join = task::spawn_on(handle, ctx, async move { handler.call(firing).await });
    handle.spawn(async move {
        match join.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(task = %task_id, source = %source, error = %e, "handler failed")
            }
            Err(e) if e.is_panic() => {
                tracing::error!(task = %task_id, source = %source, "handler panicked")
            }
            Err(_) => tracing::debug!(task = %task_id, source = %source, "handler cancelled"),
        }
    });
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
