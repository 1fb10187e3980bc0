//! System heap allocator
//!
//! Serves every span with its own request to the system allocator. Stateless,
//! so all instances are interchangeable and compare equal.

use core::alloc::{GlobalAlloc, Layout};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::System;

use super::ElementAllocator;
use crate::error::{PoolError, PoolResult};

/// Per-request system heap allocation for elements of type `T`
pub struct HeapAllocator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> HeapAllocator<T> {
    /// Creates a new HeapAllocator
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> ElementAllocator<T> for HeapAllocator<T> {
    type Rebind<U> = HeapAllocator<U>;

    const PROPAGATE_ON_CLONE_ASSIGN: bool = false;
    const PROPAGATE_ON_MOVE_ASSIGN: bool = false;
    const PROPAGATE_ON_SWAP: bool = false;
    const IS_ALWAYS_EQUAL: bool = true;

    fn allocate(&self, n: usize) -> PoolResult<NonNull<[T]>> {
        let max = self.max_size();
        if n > max {
            return Err(PoolError::capacity_overflow(n, max));
        }
        let layout = Layout::array::<T>(n).map_err(|_| PoolError::capacity_overflow(n, max))?;

        if layout.size() == 0 {
            // zero-length request or zero-sized type
            return Ok(NonNull::slice_from_raw_parts(NonNull::dangling(), n));
        }

        // SAFETY: layout has a non-zero size (checked above).
        let raw = unsafe { System.alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>())
            .ok_or_else(|| PoolError::allocation_failed(layout.size(), layout.align()))?;
        Ok(NonNull::slice_from_raw_parts(ptr, n))
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        let Ok(layout) = Layout::array::<T>(n) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        // SAFETY: ptr came from allocate(n), which used this exact layout.
        unsafe { System.dealloc(ptr.as_ptr().cast::<u8>(), layout) };
    }

    fn rebind<U>(&self) -> PoolResult<HeapAllocator<U>> {
        Ok(HeapAllocator::new())
    }
}

impl<T> Default for HeapAllocator<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for HeapAllocator<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for HeapAllocator<T> {}

impl<T, U> PartialEq<HeapAllocator<U>> for HeapAllocator<T> {
    #[inline]
    fn eq(&self, _other: &HeapAllocator<U>) -> bool {
        true
    }
}

impl<T> Eq for HeapAllocator<T> {}

impl<T> fmt::Debug for HeapAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapAllocator<{}>", core::any::type_name::<T>())
    }
}
