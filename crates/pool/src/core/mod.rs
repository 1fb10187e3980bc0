//! Core building blocks for arena-pool
//!
//! This module contains the raw storage primitive the pool is made of:
//! - [`Block`]: one contiguous region sized for a fixed element count
//! - element-count limits shared by every allocator in the crate

pub(crate) mod block;

pub use block::Block;

/// Largest element count a single request may ask for.
///
/// Rust layouts are capped at `isize::MAX` bytes, so this is
/// `isize::MAX / size_of::<T>()`. Zero-sized types have no limit.
#[inline]
#[must_use]
pub const fn max_elements<T>() -> usize {
    let size = size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}
