//! wait_pattern specs
//!
//! Exactly one of the match and the timeout resumes the task, and the
//! other never fires afterwards.

use crate::prelude::*;

fn spawn_wait(
    s: &Session,
    pattern: &'static str,
    timeout: Option<f64>,
) -> tokio::task::JoinHandle<Result<WaitOutcome, ScriptError>> {
    let auto = s.auto.clone();
    s.auto
        .spawn(async move { auto.wait_pattern(pattern, timeout).await }).unwrap()
}

#[tokio::test(start_paused = true)]
async fn match_resumes_with_the_line_and_captures() {
    let s = Session::new();
    let join = spawn_wait(&s, r"^You see (?P<what>\w+)$", Some(5.0));
    s.until(|h| h.trigger_count() == 1 && h.timer_count() == 1)
        .await;

    assert!(s.host.feed_plain("nothing here").fired.is_empty());
    let dispatch = s.host.feed_plain("You see rat");
    assert_eq!(dispatch.fired.len(), 1);
    assert!(dispatch.is_clean());

    let firing = join.await.unwrap().unwrap().into_firing().unwrap();
    assert_eq!(firing.text, "You see rat");
    assert_eq!(firing.captures.get(1), Some("rat"));
    assert_eq!(firing.captures.name("what"), Some("rat"));

    assert_eq!(s.host.trigger_count(), 0);
    assert_eq!(s.host.timer_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn timeout_resumes_without_payload() {
    let s = Session::new();
    let start = Instant::now();
    let join = spawn_wait(&s, "^never$", Some(0.5));

    assert_eq!(join.await.unwrap().unwrap(), WaitOutcome::TimedOut);
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(500), "{:?}", waited);

    assert_eq!(s.host.trigger_count(), 0);
    assert!(s.host.feed_plain("never").fired.is_empty());
}

#[tokio::test(start_paused = true)]
async fn match_before_timeout_cancels_the_timer() {
    let s = Session::new();
    let join = spawn_wait(&s, "^ready$", Some(1.0));
    s.until(|h| h.timer_count() == 1).await;

    s.host.feed_plain("ready");
    assert_eq!(s.host.timer_count(), 0);
    assert!(matches!(
        join.await.unwrap().unwrap(),
        WaitOutcome::Matched(_)
    ));

    // Well past the timeout, nothing else happens
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(s.host.trigger_count() + s.host.timer_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn styles_of_the_matched_line_are_delivered() {
    let s = Session::new();
    let join = spawn_wait(&s, "^HP", None);
    s.until(|h| h.trigger_count() == 1).await;

    let style = snare_core::InlineStyle::new(
        0,
        snare_core::Style {
            fg: Some("red".to_string()),
            bg: None,
            bold: true,
        },
    );
    s.host.feed_line("HP 10/100", vec![style.clone()]);

    let firing = join.await.unwrap().unwrap().into_firing().unwrap();
    assert_eq!(firing.styles, vec![style]);
}

#[tokio::test(start_paused = true)]
async fn only_one_waiter_consumes_each_trigger() {
    let s = Session::new();
    let first = spawn_wait(&s, "^go$", None);
    let second = spawn_wait(&s, "^go$", None);
    s.until(|h| h.trigger_count() == 2).await;

    // Both one-shot triggers match the same line; each resumes its own task
    assert_eq!(s.host.feed_plain("go").fired.len(), 2);
    assert!(matches!(first.await.unwrap().unwrap(), WaitOutcome::Matched(_)));
    assert!(matches!(second.await.unwrap().unwrap(), WaitOutcome::Matched(_)));
    assert!(s.host.feed_plain("go").fired.is_empty());
}

#[tokio::test]
async fn empty_pattern_and_bad_timeout_are_refused() {
    let s = Session::new();
    let auto = s.auto.clone();
    let (empty, negative) = s
        .auto
        .spawn(async move {
            (
                auto.wait_pattern("", Some(1.0)).await,
                auto.wait_pattern("^x", Some(0.0)).await,
            )
        })
        .unwrap()
        .await
        .unwrap();

    assert!(matches!(empty, Err(ScriptError::Validation(_))));
    assert!(matches!(negative, Err(ScriptError::Validation(_))));
    assert_eq!(s.host.trigger_count(), 0);
}

#[tokio::test]
async fn wait_pattern_outside_a_task_is_refused() {
    let s = Session::new();
    assert_eq!(
        s.auto.wait_pattern("^x", None).await,
        Err(ScriptError::Context)
    );
    assert_eq!(s.host.trigger_count(), 0);
}
