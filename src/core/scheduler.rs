//! Periodic driver for screening cycles.
//!
//! Cadence is "at most once per period": a boundary that falls inside an
//! in-progress cycle is skipped, never queued. The fixed-interval variant
//! aligns boundaries to the start instant (drift-corrected); the weekly
//! variant fires at a fixed day-of-week and time-of-day and drops missed
//! occurrences.

use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveTime, Timelike, Weekday};
use cron::Schedule;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum Cadence {
    /// First cycle immediately on start, then every fixed duration measured
    /// from start time.
    Every(Duration),
    /// One cycle at the given day-of-week and time-of-day. Occurrences that
    /// pass while the process is down or a cycle is running are missed.
    Weekly { weekday: Weekday, at: NaiveTime },
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cadence: {0}")]
    InvalidCadence(String),

    #[error("scheduler already started")]
    AlreadyStarted,
}

/// Cron expression for a weekly occurrence (second minute hour day month weekday).
pub fn weekly_cron_expr(weekday: Weekday, at: NaiveTime) -> String {
    let dow = match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    format!("{} {} {} * * {}", at.second(), at.minute(), at.hour(), dow)
}

enum Mode {
    Interval(Duration),
    Cron(Schedule),
}

/// Owns the cycle loop. Exactly one cycle is ever active: the loop awaits
/// each cycle inline before computing the next due instant.
pub struct Scheduler {
    mode: Mode,
    in_cycle: Arc<AtomicBool>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl Scheduler {
    pub fn new(cadence: Cadence) -> Result<Self, SchedulerError> {
        let mode = match cadence {
            Cadence::Every(period) => {
                if period.is_zero() {
                    return Err(SchedulerError::InvalidCadence(
                        "interval must be greater than zero".to_string(),
                    ));
                }
                Mode::Interval(period)
            }
            Cadence::Weekly { weekday, at } => {
                let expr = weekly_cron_expr(weekday, at);
                let schedule = Schedule::from_str(&expr).map_err(|e| {
                    SchedulerError::InvalidCadence(format!("cron expression '{}': {}", expr, e))
                })?;
                Mode::Cron(schedule)
            }
        };

        Ok(Self {
            mode,
            in_cycle: Arc::new(AtomicBool::new(false)),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the loop, invoking `cycle` at each due instant.
    pub async fn start<C, Fut>(&self, cycle: C) -> Result<(), SchedulerError>
    where
        C: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut handle_slot = self.handle.write().await;
        if handle_slot.is_some() {
            return Err(SchedulerError::AlreadyStarted);
        }

        let in_cycle = self.in_cycle.clone();
        let handle = match &self.mode {
            Mode::Interval(period) => {
                let period = *period;
                tokio::spawn(async move {
                    run_interval_loop(period, in_cycle, cycle).await;
                })
            }
            Mode::Cron(schedule) => {
                let schedule = schedule.clone();
                tokio::spawn(async move {
                    run_cron_loop(schedule, in_cycle, cycle).await;
                })
            }
        };

        *handle_slot = Some(handle);
        info!("scheduler started");
        Ok(())
    }

    /// Stop the loop. The snapshot is replaced atomically, so stopping
    /// mid-cycle cannot leave a partial artifact behind.
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("scheduler stopped");
        }
    }

    pub async fn is_started(&self) -> bool {
        self.handle.read().await.is_some()
    }

    /// Whether a cycle is running right now (Idle vs Running).
    pub fn is_cycle_running(&self) -> bool {
        self.in_cycle.load(Ordering::SeqCst)
    }
}

async fn run_interval_loop<C, Fut>(period: Duration, in_cycle: Arc<AtomicBool>, cycle: C)
where
    C: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    let start = tokio::time::Instant::now();
    let mut next = start;

    loop {
        tokio::time::sleep_until(next).await;

        in_cycle.store(true, Ordering::SeqCst);
        cycle().await;
        in_cycle.store(false, Ordering::SeqCst);

        // Advance to the next boundary measured from start, dropping any
        // boundary the cycle ran through.
        let now = tokio::time::Instant::now();
        next += period;
        let mut missed = 0u32;
        while next <= now {
            next += period;
            missed += 1;
        }
        if missed > 0 {
            debug!(missed, "cycle overran its period; skipping missed boundaries");
        }
    }
}

async fn run_cron_loop<C, Fut>(schedule: Schedule, in_cycle: Arc<AtomicBool>, cycle: C)
where
    C: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        // Recomputed after each cycle completes, so occurrences that fell
        // inside the cycle are dropped rather than queued.
        let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
            tokio::time::sleep(Duration::from_secs(60)).await;
            continue;
        };

        let now = chrono::Utc::now();
        if next_tick > now {
            let wait = (next_tick - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;
        }

        in_cycle.store(true, Ordering::SeqCst);
        cycle().await;
        in_cycle.store(false, Ordering::SeqCst);
    }
}
