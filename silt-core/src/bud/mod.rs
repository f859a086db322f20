//! The Block Update Detector (BUD): deferred block-update propagation.
//!
//! World mutations do not cascade immediately. Instead, anything that wants
//! a block re-evaluated enqueues an [`UpdateRequest`]; the [`Bud`] task
//! drains a bounded, deterministically ordered batch of requests each tick
//! and dispatches every entry to the handler registered for its
//! [`UpdateKind`]. Handlers mutate the world through the
//! [`BlockAccess`](crate::world::BlockAccess) contract and may enqueue
//! follow-up requests, which are never processed before the next tick.
//!
//! # Architecture
//!
//! - [`UpdateRequest`] / [`UpdateKey`] - a pending update and its dedup identity
//! - [`Bud`] - the pending set, the per-tick batch, and the drain loop
//! - [`HandlerRegistry`] / [`BudHandler`] - kind-to-handler dispatch
//! - [`LiquidSpread`] - the built-in liquid flow rule

mod engine;
mod liquid;
mod registry;
mod update;

pub use engine::{Bud, BUD_TASK_PRIORITY, QUEUE_MAX_LENGTH};
pub use liquid::LiquidSpread;
pub use registry::{BudHandler, HandlerRegistry};
pub use update::{UpdateKey, UpdateKind, UpdateRequest};
