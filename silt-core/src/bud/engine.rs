//! The Block Update Detector engine.

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::{FxBuildHasher, FxHashSet};
use silt_utils::BlockPos;

use crate::tick::TickerTask;

use super::{HandlerRegistry, UpdateKey, UpdateRequest};

/// Maximum number of requests drained into a single tick's batch.
pub const QUEUE_MAX_LENGTH: usize = 100;

/// Task priority of the BUD. Runs before ordinary simulation tasks.
pub const BUD_TASK_PRIORITY: i32 = 100;

/// Pending requests keyed by identity, in insertion order. Insertion order
/// is what makes capacity-overflow selection reproducible: when more than
/// [`QUEUE_MAX_LENGTH`] requests are eligible, the oldest win.
type PendingMap = IndexMap<UpdateKey, UpdateRequest, FxBuildHasher>;

#[derive(Default)]
struct BudState {
    /// Not-yet-drained requests.
    pending: PendingMap,
    /// The batch drained for the current tick, in dispatch order.
    batch: Vec<UpdateRequest>,
    /// Positions reported as changed by the current tick's batch.
    updated: FxHashSet<BlockPos>,
}

/// The Block Update Detector.
///
/// Collects update requests into a deduplicated, delay-aware pending set,
/// drains a bounded and deterministically ordered batch each tick, and
/// dispatches every batch entry to the handler registered for its kind.
///
/// Reported changed positions are *attempted* updates: every drained
/// position is reported whether or not its handler decided to mutate it.
pub struct Bud {
    registry: HandlerRegistry,
    state: Mutex<BudState>,
}

impl Bud {
    /// Creates a BUD dispatching through `registry`.
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            state: Mutex::new(BudState::default()),
        }
    }

    /// Queues `request`.
    ///
    /// No-op if an equal request (same dimension, position and kind) is
    /// already pending, or if the request's position was already updated
    /// during the current tick.
    pub fn enqueue(&self, request: UpdateRequest) {
        self.enqueue_inner(request, true);
    }

    /// Like [`enqueue`](Self::enqueue), but without the updated-this-tick
    /// check.
    pub fn enqueue_even_if_updated(&self, request: UpdateRequest) {
        self.enqueue_inner(request, false);
    }

    fn enqueue_inner(&self, request: UpdateRequest, skip_if_updated: bool) {
        let mut state = self.state.lock();
        if skip_if_updated && state.updated.contains(&request.pos) {
            return;
        }

        let key = request.key();
        if state.pending.contains_key(&key) {
            // Already pending; the existing request keeps its countdown.
            return;
        }

        log::trace!(
            "queued {:?} update at {} (delay={})",
            request.kind,
            request.pos,
            request.delay
        );
        state.pending.insert(key, request);
    }

    /// Moves eligible requests from the pending set into the tick batch.
    ///
    /// Every nonzero delay is decremented exactly once per drain, even when
    /// the batch is already full, so no request's countdown is skipped. A
    /// request becomes eligible on the drain where its delay reaches zero;
    /// at most [`QUEUE_MAX_LENGTH`] eligible requests are drained (oldest
    /// first) and the rest stay pending, still eligible, for the next tick.
    ///
    /// The drained batch is sorted by `(kind, x, y, z)` ascending so that
    /// dispatch order never depends on set iteration order.
    fn drain(state: &mut BudState) {
        state.batch.clear();
        state.updated.clear();

        let pending = std::mem::take(&mut state.pending);
        for (key, mut request) in pending {
            if request.delay > 0 {
                request.delay -= 1;
            }
            if request.delay == 0 && state.batch.len() < QUEUE_MAX_LENGTH {
                state.batch.push(request);
            } else {
                state.pending.insert(key, request);
            }
        }

        state.batch.sort_by_key(|request| {
            let pos = request.pos.0;
            (request.kind, pos.x, pos.y, pos.z)
        });
    }

    /// Runs one propagation tick: drain, dispatch in batch order, report.
    ///
    /// The state lock is released while handlers run, so handlers can
    /// enqueue follow-up requests; those land in the pending set and are
    /// processed no earlier than the next tick.
    fn run(&self) -> FxHashSet<BlockPos> {
        let batch = {
            let mut state = self.state.lock();
            Self::drain(&mut state);
            state.batch.clone()
        };

        for request in &batch {
            self.registry.handler(request.kind).handle(self, request);
        }

        let mut state = self.state.lock();
        state.updated = batch.iter().map(|request| request.pos).collect();
        state.updated.clone()
    }

    /// Empties the pending set, the current batch, and the updated-position
    /// record. For world resets and test isolation.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.pending.clear();
        state.batch.clear();
        state.updated.clear();
    }

    /// Number of pending (not yet drained) requests.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Number of requests drained into the most recent batch.
    #[must_use]
    pub fn batch_len(&self) -> usize {
        self.state.lock().batch.len()
    }

    /// Number of positions reported as changed by the most recent tick.
    #[must_use]
    pub fn updated_len(&self) -> usize {
        self.state.lock().updated.len()
    }
}

impl TickerTask for Bud {
    fn priority(&self) -> i32 {
        BUD_TASK_PRIORITY
    }

    fn update(&self) -> Option<FxHashSet<BlockPos>> {
        Some(self.run())
    }
}
