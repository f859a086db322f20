//! Pending-update types.

use std::fmt;
use std::sync::Arc;

use silt_utils::BlockPos;

use crate::world::{BlockAccess, DimensionId};

/// Kind of a pending update. Selects the handler and is the primary
/// batch-ordering key; lower values dispatch first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UpdateKind {
    /// A plain block update (liquid flow).
    Normal = 0,
    /// A powered update (reserved for redstone-style propagation).
    Powered = 1,
}

/// One pending world-update intent.
#[derive(Clone)]
pub struct UpdateRequest {
    /// The world the update applies to. Handlers borrow it for the
    /// duration of a dispatch; the BUD itself never touches it.
    pub dimension: Arc<dyn BlockAccess>,
    /// The target position.
    pub pos: BlockPos,
    /// Handler selector and ordering key.
    pub kind: UpdateKind,
    /// Ticks remaining before this request becomes drain-eligible.
    pub delay: u32,
}

impl UpdateRequest {
    /// An update with no extra delay, eligible on the next tick.
    #[must_use]
    pub fn new(dimension: Arc<dyn BlockAccess>, pos: BlockPos, kind: UpdateKind) -> Self {
        Self {
            dimension,
            pos,
            kind,
            delay: 0,
        }
    }

    /// An update deferred by `delay` ticks.
    #[must_use]
    pub fn delayed(
        dimension: Arc<dyn BlockAccess>,
        pos: BlockPos,
        kind: UpdateKind,
        delay: u32,
    ) -> Self {
        Self {
            dimension,
            pos,
            kind,
            delay,
        }
    }

    /// The dedup identity of this request.
    ///
    /// Delay is payload, not identity: a duplicate enqueue never restarts
    /// or shortens an existing request's countdown.
    #[must_use]
    pub fn key(&self) -> UpdateKey {
        UpdateKey {
            dimension: self.dimension.id().clone(),
            pos: self.pos,
            kind: self.kind,
        }
    }
}

impl fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("dimension", self.dimension.id())
            .field("pos", &self.pos)
            .field("kind", &self.kind)
            .field("delay", &self.delay)
            .finish()
    }
}

/// Composite key identifying a pending update in the dedup set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateKey {
    /// The owning dimension.
    pub dimension: DimensionId,
    /// The target position.
    pub pos: BlockPos,
    /// The update kind.
    pub kind: UpdateKind,
}
