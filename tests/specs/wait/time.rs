//! wait_time specs
//!
//! A task suspended on a timer resumes after the interval with nothing
//! left armed on the host.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn wait_time_resumes_after_the_duration() {
    let s = Session::new();
    let auto = s.auto.clone();
    let start = Instant::now();

    let elapsed = s
        .auto
        .spawn(async move { auto.wait_time(0.01).await.map(|()| start.elapsed()) })
        .unwrap()
        .await
        .unwrap()
        .unwrap();

    assert!(elapsed >= Duration::from_millis(10), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(20), "{:?}", elapsed);
    assert_eq!(s.host.timer_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn consecutive_waits_add_up() {
    let s = Session::new();
    let auto = s.auto.clone();
    let start = Instant::now();

    let elapsed = s
        .auto
        .spawn(async move {
            auto.wait_time(0.1).await?;
            auto.wait_time(0.25).await?;
            Ok::<_, ScriptError>(start.elapsed())
        })
        .unwrap()
        .await
        .unwrap()
        .unwrap();

    assert!(elapsed >= Duration::from_millis(350), "{:?}", elapsed);
    assert!(elapsed < Duration::from_millis(360), "{:?}", elapsed);
}

#[tokio::test]
async fn wait_time_outside_a_task_is_refused() {
    let s = Session::new();
    assert_eq!(s.auto.wait_time(0.01).await, Err(ScriptError::Context));
    assert_eq!(s.host.timer_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn handlers_may_wait() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let auto = s.auto.clone();
    s.auto
        .create_trigger(TriggerConfig::new("^open door$"), move |_: Firing| {
            let auto = auto.clone();
            let tx = tx.clone();
            async move {
                auto.wait_time(2.0).await?;
                let _ = tx.send(Instant::now());
                Ok::<_, ScriptError>(())
            }
        })
        .unwrap();

    let start = Instant::now();
    s.host.feed_plain("open door");
    let resumed = rx.recv().await.unwrap();
    let waited = resumed - start;
    assert!(waited >= Duration::from_secs(2), "{:?}", waited);
    assert!(waited < Duration::from_millis(2010), "{:?}", waited);
}
