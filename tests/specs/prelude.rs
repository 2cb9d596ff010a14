//! Shared helpers for behavioral specs

pub use snare_adapters::{HostEngine, TracedHost};
pub use snare_core::{AutomationConfig, Config, Firing, HostConfig, SequentialIdGen};
pub use snare_engine::LocalHost;
pub use snare_script::{
    AliasConfig, Automation, ScriptError, TimerConfig, TriggerConfig, WaitOutcome,
};
pub use std::time::Duration;
pub use tokio::sync::mpsc;
pub use tokio::time::Instant;

pub type Auto = Automation<TracedHost<LocalHost>, SequentialIdGen>;

/// A local host with a traced automation layer on top
pub struct Session {
    pub host: LocalHost,
    pub auto: Auto,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let host = LocalHost::new(config.host);
        let auto = Automation::new(
            TracedHost::new(host.clone()),
            SequentialIdGen::new(""),
            config.automation,
        );
        Self { host, auto }
    }

    /// Yield until `cond` holds on the host
    pub async fn until(&self, cond: impl Fn(&LocalHost) -> bool) {
        for _ in 0..100 {
            if cond(&self.host) {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("host never reached the expected state");
    }
}

/// Handler forwarding each firing to a channel
pub fn forward(
    tx: mpsc::UnboundedSender<Firing>,
) -> impl Fn(Firing) -> std::future::Ready<Result<(), ScriptError>> + Send + Sync + 'static {
    move |firing| {
        let _ = tx.send(firing);
        std::future::ready(Ok(()))
    }
}
