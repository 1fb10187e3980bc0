//! Arena pool storage
//!
//! A pool owns coarse-grained blocks for one element type and serves slots
//! out of them with a bump cursor, optionally recycling single slots.
//!
//! ## Modules
//! - `state` - [`PoolState`]: blocks, bump cursor, growth and free list
//! - `handle` - [`PoolHandle`]: shared reference-counted access to one state
//! - `stats` - [`PoolStats`] snapshot

pub mod handle;
pub mod state;
pub mod stats;

pub use handle::PoolHandle;
pub use state::{PoolPhase, PoolState};
pub use stats::PoolStats;
