//! The world-access contract and the sparse in-memory dimension.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use silt_utils::BlockPos;

use super::Block;

/// Identifier of a dimension. Cheap to clone; participates in the dedup
/// keys of pending block updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionId(Arc<str>);

impl DimensionId {
    /// Creates a dimension id.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The narrow world-access contract the simulation core depends on.
///
/// Implementors are free to chunk, generate, and persist however they like;
/// the update engine and its handlers only ever read and write single
/// blocks. Implementations use interior mutability so that a handler's
/// writes are visible to later reads within the same tick batch.
pub trait BlockAccess: Send + Sync {
    /// Stable identifier for this world.
    fn id(&self) -> &DimensionId;

    /// Returns the block at `pos`.
    ///
    /// With `generate_if_missing`, storage that has no entry for `pos`
    /// materializes one instead of returning `None`.
    fn get_block(&self, pos: BlockPos, generate_if_missing: bool) -> Option<Block>;

    /// Replaces the block at `pos`.
    ///
    /// Without `generate_if_missing`, a write to a position that has no
    /// storage entry is dropped.
    fn set_block(&self, pos: BlockPos, block: Block, generate_if_missing: bool);
}

/// A sparse in-memory dimension. Missing entries generate as [`Block::Air`].
pub struct Dimension {
    id: DimensionId,
    blocks: RwLock<FxHashMap<BlockPos, Block>>,
}

impl Dimension {
    /// Creates an empty dimension.
    #[must_use]
    pub fn new(id: DimensionId) -> Self {
        Self {
            id,
            blocks: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of materialized blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.read().len()
    }
}

impl BlockAccess for Dimension {
    fn id(&self) -> &DimensionId {
        &self.id
    }

    fn get_block(&self, pos: BlockPos, generate_if_missing: bool) -> Option<Block> {
        if let Some(block) = self.blocks.read().get(&pos) {
            return Some(*block);
        }
        if !generate_if_missing {
            return None;
        }
        Some(*self.blocks.write().entry(pos).or_default())
    }

    fn set_block(&self, pos: BlockPos, block: Block, generate_if_missing: bool) {
        let mut blocks = self.blocks.write();
        if !generate_if_missing && !blocks.contains_key(&pos) {
            return;
        }
        blocks.insert(pos, block);
    }
}
