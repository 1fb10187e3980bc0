//! # arena-pool
//!
//! Chunked arena allocation for many same-type, fixed-size values.
//!
//! The pool acquires memory from the system in coarse blocks and serves
//! element spans out of them with a bump cursor:
//! - Growable or fixed-capacity pools
//! - Optional LIFO free list recycling single-element spans
//! - Shared storage across allocator clones via a reference-counted handle
//! - An [`ElementAllocator`] contract generic containers can program against
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_pool::prelude::*;
//!
//! let alloc = PoolAllocator::<u64>::with_config(PoolConfig::recycling(32))?;
//!
//! let span = alloc.allocate(4)?;
//! let first = span.cast::<u64>();
//! unsafe {
//!     alloc.construct(first, 42);
//!     assert_eq!(*first.as_ptr(), 42);
//!     alloc.destroy(first);
//!     alloc.deallocate(first, 4);
//! }
//!
//! // clones share the arena
//! let other = alloc.clone();
//! assert_eq!(alloc, other);
//! # Ok::<(), arena_pool::PoolError>(())
//! ```
//!
//! ## Arena semantics
//!
//! Deallocation never returns memory to the system. Single-element spans
//! may be recycled through the free list; everything else stays reserved
//! until the last handle to the pool is dropped, which releases every block
//! at once.
//!
//! ## Known behaviors
//!
//! - **No storage inheritance across element-type rebind.** Rebinding a
//!   [`PoolAllocator<T>`] to `U` builds a new, independent pool with the same
//!   policy. Containers of different element types derived from one allocator
//!   do not share an arena.
//! - **Capacity accounting ignores blocks behind the cursor.** `reserve`
//!   counts the unused tail of the current block plus every block after it.
//!   Unused tails of earlier blocks are not counted, so a reservation may add
//!   a block even though enough scattered space exists.
//!
//! ## Features
//!
//! - `logging` (default): structured events through `tracing`
//!
//! ## Threading
//!
//! Nothing in this crate locks. Pools and allocators are `!Send` and `!Sync`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::double_must_use)]
#![allow(clippy::return_self_not_must_use)]

// Error types
pub mod error;

// Core modules
pub mod allocator;
pub mod core;
pub mod pool;

pub use crate::allocator::{ElementAllocator, HeapAllocator, PoolAllocator, PoolConfig};
pub use crate::error::{PoolError, PoolResult, Result};
pub use crate::pool::{PoolHandle, PoolStats};

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    // Error types
    pub use crate::error::{PoolError, PoolResult};

    // Allocators
    pub use crate::allocator::{ElementAllocator, HeapAllocator, PoolAllocator, PoolConfig};

    // Pool internals
    pub use crate::pool::{PoolHandle, PoolPhase, PoolState, PoolStats};
}
