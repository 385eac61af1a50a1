//! Unit tests for the scheduler

use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Datelike, NaiveTime, Timelike, Weekday};
use tokio_test::assert_ok;
use trendsift::core::scheduler::{weekly_cron_expr, Cadence, Scheduler, SchedulerError};

fn recorded_starts() -> (
    Arc<Mutex<Vec<u64>>>,
    impl Fn() -> std::future::Ready<()> + Send + 'static,
) {
    let starts: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let base = tokio::time::Instant::now();
    let starts_clone = starts.clone();
    let cycle = move || {
        let elapsed = tokio::time::Instant::now().duration_since(base).as_secs();
        starts_clone.lock().unwrap().push(elapsed);
        std::future::ready(())
    };
    (starts, cycle)
}

#[test]
fn test_zero_interval_is_rejected() {
    let result = Scheduler::new(Cadence::Every(Duration::ZERO));
    assert!(matches!(result, Err(SchedulerError::InvalidCadence(_))));
}

#[test]
fn test_weekly_cron_expr_format() {
    let at = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
    assert_eq!(weekly_cron_expr(Weekday::Mon, at), "0 30 10 * * Mon");

    let schedule = cron::Schedule::from_str(&weekly_cron_expr(Weekday::Mon, at)).unwrap();
    let next = schedule.upcoming(chrono::Utc).next().unwrap();
    assert_eq!(next.weekday(), Weekday::Mon);
    assert_eq!(next.hour(), 10);
    assert_eq!(next.minute(), 30);
}

#[tokio::test(start_paused = true)]
async fn test_first_cycle_runs_immediately() {
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    let (starts, cycle) = recorded_starts();
    scheduler.start(cycle).await.unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    scheduler.stop().await;

    assert_eq!(*starts.lock().unwrap(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn test_cycles_align_to_period_boundaries() {
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    let (starts, cycle) = recorded_starts();
    scheduler.start(cycle).await.unwrap();

    tokio::time::sleep(Duration::from_secs(950)).await;
    scheduler.stop().await;

    assert_eq!(*starts.lock().unwrap(), vec![0, 300, 600, 900]);
}

#[tokio::test(start_paused = true)]
async fn test_overrunning_cycle_skips_missed_boundaries() {
    // 5-minute cadence, 7-minute cycles: the boundary at 300s falls inside
    // the first cycle and is dropped; the next start is the 600s boundary.
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    let starts: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
    let base = tokio::time::Instant::now();
    let starts_clone = starts.clone();
    scheduler
        .start(move || {
            let starts = starts_clone.clone();
            let elapsed = tokio::time::Instant::now().duration_since(base).as_secs();
            async move {
                starts.lock().unwrap().push(elapsed);
                tokio::time::sleep(Duration::from_secs(420)).await;
            }
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(1330)).await;
    scheduler.stop().await;

    let starts = starts.lock().unwrap();
    assert_eq!(*starts, vec![0, 600, 1200]);
    for pair in starts.windows(2) {
        assert!(pair[1] - pair[0] >= 300);
    }
}

#[tokio::test(start_paused = true)]
async fn test_running_flag_tracks_cycle_state() {
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    scheduler
        .start(|| tokio::time::sleep(Duration::from_secs(100)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(50)).await;
    assert!(scheduler.is_cycle_running());

    tokio::time::sleep(Duration::from_secs(100)).await;
    assert!(!scheduler.is_cycle_running());

    scheduler.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_start_twice_is_rejected() {
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    scheduler.start(|| std::future::ready(())).await.unwrap();
    let second = scheduler.start(|| std::future::ready(())).await;
    assert!(matches!(second, Err(SchedulerError::AlreadyStarted)));
    scheduler.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_clears_lifecycle_state() {
    let scheduler = Scheduler::new(Cadence::Every(Duration::from_secs(300))).unwrap();
    assert_ok!(scheduler.start(|| std::future::ready(())).await);
    assert!(scheduler.is_started().await);

    scheduler.stop().await;
    assert!(!scheduler.is_started().await);
}
