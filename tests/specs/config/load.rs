//! Configuration specs

use crate::prelude::*;
use std::io::Write;

#[tokio::test(start_paused = true)]
async fn loaded_config_drives_host_and_waits() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[automation]
wait_group = "waits"

[host]
command_delimiter = "|"
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.automation.wait_group, "waits");
    assert_eq!(config.automation.default_group, "default");

    let s = Session::with_config(config);
    assert_eq!(s.host.process_input("a|b").commands.len(), 2);

    // Waits arm their sources in the configured group
    let auto = s.auto.clone();
    let join = s
        .auto
        .spawn(async move { auto.wait_pattern("^x$", Some(1.0)).await }).unwrap();
    s.until(|h| h.trigger_count() == 1).await;
    s.auto.enable_trigger_group("waits", false);

    assert!(s.host.feed_plain("x").fired.is_empty());
    assert_eq!(join.await.unwrap().unwrap(), WaitOutcome::TimedOut);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, snare_core::ConfigError::Io { .. }));
}
