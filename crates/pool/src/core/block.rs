//! Raw storage blocks
//!
//! # Safety
//!
//! A [`Block`] owns one region obtained from the system allocator:
//! - The region is sized and aligned by `Layout::array::<T>(capacity)`
//! - Slots are never initialized or dropped by the block itself
//! - The region is returned to the system allocator exactly once, on drop
//! - Zero-sized layouts (ZSTs) use a dangling, well-aligned pointer and are never freed

use core::alloc::{GlobalAlloc, Layout};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::System;

use super::max_elements;
use crate::error::{PoolError, PoolResult};

/// One contiguous raw extent sized for `capacity` elements of `T`
pub struct Block<T> {
    ptr: NonNull<T>,
    capacity: usize,
    layout: Layout,
    _marker: PhantomData<T>,
}

impl<T> Block<T> {
    /// Acquires a region for `capacity` elements from the system allocator
    ///
    /// # Errors
    /// - `CapacityOverflow` if `capacity * size_of::<T>()` does not fit a layout
    /// - `AllocationFailed` if the system allocator returns null
    pub fn allocate(capacity: usize) -> PoolResult<Self> {
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| PoolError::capacity_overflow(capacity, max_elements::<T>()))?;

        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                layout,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size (checked above).
        let raw = unsafe { System.alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>())
            .ok_or_else(|| PoolError::allocation_failed(layout.size(), layout.align()))?;

        Ok(Self {
            ptr,
            capacity,
            layout,
            _marker: PhantomData,
        })
    }

    /// Number of elements this block can hold
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of the region in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.layout.size()
    }

    /// Pointer to the first slot
    #[inline]
    pub fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Pointer to the slot at `offset`
    ///
    /// # Safety
    /// `offset` must be `<= capacity` (one-past-the-end is allowed).
    #[inline]
    pub unsafe fn slot(&self, offset: usize) -> NonNull<T> {
        debug_assert!(offset <= self.capacity);
        // SAFETY: offset is within the allocation or one past its end (caller contract).
        unsafe { self.ptr.add(offset) }
    }

    /// Whether `ptr` points at a slot inside this block
    pub fn contains(&self, ptr: NonNull<T>) -> bool {
        if self.layout.size() == 0 {
            return false;
        }
        let start = self.ptr.as_ptr() as usize;
        let addr = ptr.as_ptr() as usize;
        addr >= start && addr < start + self.layout.size()
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        if self.layout.size() == 0 {
            return;
        }
        // SAFETY: ptr was returned by System.alloc with this exact layout and
        // is released only here.
        unsafe { System.dealloc(self.ptr.as_ptr().cast::<u8>(), self.layout) };
    }
}

impl<T> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .field("bytes", &self.layout.size())
            .finish()
    }
}
