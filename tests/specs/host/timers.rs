//! Timer specs

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn periodic_timer_fires_each_interval_until_deleted() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let name = s
        .auto
        .create_timer(TimerConfig::new(0.1), forward(tx))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(350)).await;
    let mut fired = 0;
    while rx.try_recv().is_ok() {
        fired += 1;
    }
    assert_eq!(fired, 3);

    s.auto.delete_timer(&name).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn oneshot_timer_fires_once_then_disappears() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let name = s
        .auto
        .create_oneshot_timer(TimerConfig::new(0.2).name("reminder"), forward(tx))
        .unwrap();
    assert_eq!(name, "reminder");

    let firing = rx.recv().await.unwrap();
    assert_eq!(firing.name, "reminder");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rx.try_recv().is_err());
    assert!(!s.host.has_timer("reminder"));
}

#[tokio::test(start_paused = true)]
async fn disabled_timer_group_skips_ticks() {
    let s = Session::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    s.auto
        .create_timer(TimerConfig::new(0.1).group("ambient"), forward(tx))
        .unwrap();

    s.auto.enable_timer_group("ambient", false);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(rx.try_recv().is_err());

    s.auto.enable_timer_group("ambient", true);
    assert!(rx.recv().await.is_some());
}
