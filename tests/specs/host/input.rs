//! User input specs
//!
//! Aliases claim commands; everything else is passed through.

use crate::prelude::*;

#[tokio::test]
async fn alias_claims_command_and_rest_passes_through() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    s.auto
        .create_alias(AliasConfig::new(r"^k (\w+)$"), forward(tx))
        .unwrap();

    let dispatch = s.host.process_input("k rat;look\n");
    assert_eq!(dispatch.commands, vec!["look".to_string()]);
    assert_eq!(dispatch.fired.len(), 1);

    let firing = rx.recv().await.unwrap();
    assert_eq!(firing.text, "k rat");
    assert_eq!(firing.captures.get(1), Some("rat"));
}

#[tokio::test]
async fn configured_delimiter_splits_commands() {
    let s = Session::with_config(Config {
        host: HostConfig {
            command_delimiter: '|',
            ..HostConfig::default()
        },
        ..Config::default()
    });

    let dispatch = s.host.process_input("n|e;s");
    assert_eq!(dispatch.commands, vec!["n".to_string(), "e;s".to_string()]);
}

#[tokio::test]
async fn disabled_alias_group_passes_commands_through() {
    let s = Session::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    s.auto
        .create_alias(AliasConfig::new("^go$").group("travel"), forward(tx))
        .unwrap();

    s.auto.enable_alias_group("travel", false);
    let dispatch = s.host.process_input("go");
    assert_eq!(dispatch.commands, vec!["go".to_string()]);
    assert!(dispatch.fired.is_empty());
}

#[tokio::test(start_paused = true)]
async fn alias_handler_can_wait_for_the_reply() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let auto = s.auto.clone();
    s.auto
        .create_alias(AliasConfig::new("^score$"), move |_: Firing| {
            let auto = auto.clone();
            let tx = tx.clone();
            async move {
                let outcome = auto.wait_pattern(r"^Level (\d+)$", Some(3.0)).await?;
                let _ = tx.send(outcome);
                Ok::<_, ScriptError>(())
            }
        })
        .unwrap();

    s.host.process_input("score");
    s.until(|h| h.trigger_count() == 1).await;
    s.host.feed_plain("Level 12");

    let firing = rx.recv().await.unwrap().into_firing().unwrap();
    assert_eq!(firing.captures.get(1), Some("12"));
}
