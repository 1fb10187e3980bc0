//! Allocator front-ends
//!
//! [`PoolAllocator`] is the arena-backed front-end; [`HeapAllocator`] serves
//! the same [`ElementAllocator`] contract straight from the system heap and is
//! the baseline the pool is compared against.

mod config;
mod pool;
mod system;
mod traits;

pub use config::{DEFAULT_CHUNK_SIZE, PoolConfig};
pub use pool::PoolAllocator;
pub use system::HeapAllocator;
pub use traits::ElementAllocator;
