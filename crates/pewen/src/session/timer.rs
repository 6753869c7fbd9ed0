//! Decay timer with guaranteed cancellation

use std::time::Duration;

use log::trace;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Delivers ticks for one timer arm.
///
/// Every tick carries the epoch it was armed with, so the session can tell a
/// live tick from one queued before a disarm.
#[derive(Debug, Clone)]
pub struct TickSender {
    epoch: u64,
    tx: UnboundedSender<u64>,
}

impl TickSender {
    /// Create a sender for `epoch` writing into `tx`.
    pub fn new(epoch: u64, tx: UnboundedSender<u64>) -> Self {
        Self { epoch, tx }
    }

    /// Epoch this sender was armed with.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Send one tick. Returns `false` once the session is gone.
    pub fn send(&self) -> bool {
        self.tx.send(self.epoch).is_ok()
    }
}

/// Source of periodic decay ticks.
pub trait Scheduler: Send {
    /// Start delivering ticks. Ticks stop when the returned guard drops.
    fn start(&self, ticks: TickSender) -> TimerGuard;
}

/// RAII guard that aborts the timer task when dropped.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pewen::session::{IntervalScheduler, Scheduler, TickSender};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
/// let scheduler = IntervalScheduler::new(Duration::from_secs(1));
/// {
///     let guard = scheduler.start(TickSender::new(1, tx));
///     assert!(guard.is_running());
/// }
/// // guard dropped, timer task aborted
/// # }
/// ```
#[derive(Debug)]
pub struct TimerGuard {
    task: Option<JoinHandle<()>>,
}

impl TimerGuard {
    /// Guard a spawned timer task.
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Whether the guarded task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            trace!("disarming decay timer");
            task.abort();
        }
    }
}

/// Ticks at a fixed period on the tokio clock. The first tick lands one
/// period after arming.
#[derive(Debug, Clone, Copy)]
pub struct IntervalScheduler {
    period: Duration,
}

impl IntervalScheduler {
    /// Create a scheduler ticking every `period`.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&self, ticks: TickSender) -> TimerGuard {
        let period = self.period;
        trace!("arming decay timer, epoch {}", ticks.epoch());
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !ticks.send() {
                    break;
                }
            }
        });
        TimerGuard::new(task)
    }
}
