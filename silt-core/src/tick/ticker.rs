//! The fixed-interval tick driver.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use silt_utils::BlockPos;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::TickConfig;

use super::{TaskList, TickerTask};

/// Capacity of the tick-event channel. Subscribers that fall further behind
/// than this observe a lag error rather than blocking the tick loop.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Published after every tick, whether or not anything changed.
#[derive(Debug, Clone)]
pub struct TickEvent {
    /// Positions changed by any task during the tick, value-deduplicated.
    pub changed_blocks: Arc<FxHashSet<BlockPos>>,
}

struct Running {
    started_at: Instant,
    cancel: CancellationToken,
}

/// Drives registered tasks at a fixed rate.
///
/// Each tick runs every task in priority order, unions the positions they
/// report as changed, sweeps disposed tasks, and publishes a [`TickEvent`].
/// The loop sleeps for the remainder of the current tick interval as
/// measured from the start stamp, so scheduling error does not accumulate
/// over time.
///
/// A task that panics during its update is logged, removed from the list,
/// and disposed; one misbehaving task cannot halt the tick loop.
pub struct Ticker {
    tasks: Mutex<TaskList>,
    running: Mutex<Option<Running>>,
    events: broadcast::Sender<TickEvent>,
    period: Duration,
}

impl Ticker {
    /// Creates a stopped ticker with the given tick rate.
    #[must_use]
    pub fn new(config: &TickConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            tasks: Mutex::new(TaskList::new()),
            running: Mutex::new(None),
            events,
            period: config.tick_duration(),
        }
    }

    /// Registers a task. Takes effect at the start of the next tick if a
    /// tick is currently executing.
    pub fn register(&self, task: Arc<dyn TickerTask>) {
        self.tasks.lock().add(task);
    }

    /// Subscribes to tick-complete events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TickEvent> {
        self.events.subscribe()
    }

    /// Whether the tick loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Starts the tick loop. No-op if already running.
    ///
    /// The first tick executes immediately; every later tick fires on the
    /// next multiple of the tick interval after the start stamp.
    ///
    /// # Panics
    /// Panics if called from outside a Tokio runtime.
    pub fn start(self: &Arc<Self>) {
        let mut running = self.running.lock();
        if running.is_some() {
            return;
        }

        let cancel = CancellationToken::new();
        *running = Some(Running {
            started_at: Instant::now(),
            cancel: cancel.clone(),
        });
        drop(running);

        let ticker = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                ticker.run_tasks();

                // Stopped from within a task's update.
                let Some(wait) = ticker.millis_until_next_tick() else {
                    break;
                };

                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(Duration::from_millis(wait)) => {}
                }
            }
        });
    }

    /// Stops the tick loop. No-op if not running.
    ///
    /// The next scheduled tick never fires; a tick that is already
    /// executing runs to completion.
    pub fn stop(&self) {
        let mut running = self.running.lock();
        let Some(state) = running.take() else {
            return;
        };
        state.cancel.cancel();
    }

    /// Time remaining until the next tick boundary, in milliseconds, or
    /// `None` when the ticker is stopped.
    ///
    /// Computed as `period - (elapsed % period)` against the start stamp,
    /// never by adding the period to the previous deadline, so per-tick
    /// scheduling error cannot build up.
    #[must_use]
    pub fn millis_until_next_tick(&self) -> Option<u64> {
        let running = self.running.lock();
        let started_at = running.as_ref()?.started_at;
        let period = self.period.as_millis() as u64;
        let elapsed = started_at.elapsed().as_millis() as u64;
        Some(period - (elapsed % period))
    }

    /// Runs all tasks for the current tick, sweeps disposed tasks, and
    /// publishes the aggregated changed positions.
    fn run_tasks(&self) {
        let snapshot = self.tasks.lock().snapshot();

        let mut changed = FxHashSet::default();
        let mut panicked: Vec<Arc<dyn TickerTask>> = Vec::new();

        for task in &snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| task.update())) {
                Ok(Some(positions)) => changed.extend(positions),
                Ok(None) => {}
                Err(payload) => {
                    log::error!(
                        "task (priority {}) panicked during update: {}; removing it",
                        task.priority(),
                        panic_message(payload.as_ref()),
                    );
                    panicked.push(Arc::clone(task));
                }
            }
        }

        {
            let mut tasks = self.tasks.lock();
            for task in &panicked {
                tasks.remove(task);
            }
            tasks.sweep();
        }

        // Nobody listening is fine.
        let _ = self.events.send(TickEvent {
            changed_blocks: Arc::new(changed),
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
