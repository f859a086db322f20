//! World storage contract and a minimal in-memory implementation.
//!
//! The simulation core is agnostic to chunking, generation, and persistence
//! strategy; everything it needs from a world is the [`BlockAccess`]
//! contract. [`Dimension`] is the sparse in-memory implementation used by
//! the demo binary and the tests.

mod block;
mod dimension;

pub use block::Block;
pub use dimension::{BlockAccess, Dimension, DimensionId};
