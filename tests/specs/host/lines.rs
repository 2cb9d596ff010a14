//! Incoming line specs
//!
//! Triggers created through the script surface fire on matching lines.

use crate::prelude::*;

#[tokio::test]
async fn every_matching_trigger_fires_in_creation_order() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let first = s
        .auto
        .create_trigger(TriggerConfig::new("rat"), forward(tx.clone()))
        .unwrap();
    let second = s
        .auto
        .create_trigger(TriggerConfig::new("^A"), forward(tx))
        .unwrap();

    let dispatch = s.host.feed_plain("A rat scurries past.");
    assert_eq!(dispatch.fired, vec![first.clone(), second.clone()]);

    let mut names = vec![rx.recv().await.unwrap().name, rx.recv().await.unwrap().name];
    names.sort();
    assert_eq!(names, vec![first, second]);
}

#[tokio::test]
async fn oneshot_trigger_fires_once() {
    let s = Session::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    s.auto
        .create_oneshot_trigger(TriggerConfig::new("^bell$"), forward(tx))
        .unwrap();

    assert_eq!(s.host.feed_plain("bell").fired.len(), 1);
    assert!(s.host.feed_plain("bell").fired.is_empty());
    assert_eq!(s.host.trigger_count(), 0);
}

#[tokio::test]
async fn multi_line_trigger_sees_joined_lines() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    s.auto
        .create_trigger(
            TriggerConfig::new(r"^Exits:\n(?P<exits>.+)$").match_lines(2),
            forward(tx),
        )
        .unwrap();

    s.host.feed_plain("Exits:");
    s.host.feed_plain("north, south");

    let firing = rx.recv().await.unwrap();
    assert_eq!(firing.text, "Exits:\nnorth, south");
    assert_eq!(firing.captures.name("exits"), Some("north, south"));
}

#[tokio::test]
async fn match_lines_beyond_the_line_cache_is_rejected() {
    let s = Session::with_config(Config {
        host: HostConfig {
            max_match_lines: 3,
            ..HostConfig::default()
        },
        ..Config::default()
    });
    let (tx, _rx) = mpsc::unbounded_channel();
    let err = s
        .auto
        .create_trigger(TriggerConfig::new("x").match_lines(4), forward(tx))
        .unwrap_err();
    assert!(matches!(err, ScriptError::Registration(_)));
}

#[tokio::test]
async fn disabled_group_stays_registered_but_silent() {
    let s = Session::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let name = s
        .auto
        .create_trigger(TriggerConfig::new("^x$").group("combat"), forward(tx))
        .unwrap();

    s.auto.enable_trigger_group("combat", false);
    assert!(s.host.feed_plain("x").fired.is_empty());
    assert!(s.host.has_trigger(&name));

    s.auto.enable_trigger_group("combat", true);
    assert_eq!(s.host.feed_plain("x").fired, vec![name]);
}

#[tokio::test]
async fn invalid_regex_is_a_registration_error() {
    let s = Session::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let err = s
        .auto
        .create_trigger(TriggerConfig::new("(unclosed"), forward(tx))
        .unwrap_err();
    assert!(matches!(err, ScriptError::Registration(_)));
    assert_eq!(s.host.trigger_count(), 0);
}

#[tokio::test]
async fn deleting_twice_is_harmless() {
    let s = Session::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let name = s
        .auto
        .create_trigger(TriggerConfig::new("x"), forward(tx))
        .unwrap();

    s.auto.delete_trigger(&name).unwrap();
    s.auto.delete_trigger(&name).unwrap();
    assert!(!s.host.has_trigger(&name));
}
