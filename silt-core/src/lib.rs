//! # silt-core
//!
//! The tick-based simulation core: a fixed-rate task scheduler (the
//! [`tick`] module) and a deferred, deduplicated, capacity-bounded
//! block-update propagation engine (the [`bud`] module) driving
//! cellular-automaton-style world mutation such as liquid flow.
//!
//! World storage is an external collaborator; the core only depends on the
//! narrow [`world::BlockAccess`] contract.

pub mod bud;
pub mod config;
pub mod tick;
pub mod world;
