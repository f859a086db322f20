//! The schedulable-task contract.

use rustc_hash::FxHashSet;
use silt_utils::BlockPos;

/// A task executed once per tick by the [`Ticker`](super::Ticker).
pub trait TickerTask: Send + Sync {
    /// The task's priority. Higher values run earlier within a tick; the
    /// value must stay constant for the task's lifetime.
    fn priority(&self) -> i32;

    /// Runs the task for the current tick.
    ///
    /// Returns the positions of blocks the task changed, if any, so the
    /// ticker can aggregate them into the tick-complete event.
    fn update(&self) -> Option<FxHashSet<BlockPos>>;

    /// Whether the task should be removed from the ticker.
    ///
    /// Checked after `update` has run, so a task can dispose itself from
    /// inside its own update.
    fn disposed(&self) -> bool {
        false
    }

    /// Called exactly once when the task is removed from the task list.
    fn dispose(&self) {}
}
