//! Element allocator contract
//!
//! [`ElementAllocator`] is what generic containers program against: count-based
//! allocation of uninitialized spans, per-element construction and teardown,
//! identity equality, rebinding to another element type and the propagation
//! flags that tell a container what to do with its allocator on clone, move
//! and swap.
//!
//! # Safety
//!
//! Implementors must hand out spans that are:
//! - sized for `n` elements of `T` and aligned for `T`
//! - disjoint from every other live span of the same allocator
//! - valid until the span is deallocated or the backing storage is torn down
//!
//! Callers own the initialization state of every span: the allocator never
//! reads, initializes or drops element memory on its own.

use core::ptr::{self, NonNull};

use crate::core::max_elements;
use crate::error::PoolResult;

/// Count-based allocator for elements of type `T`
pub trait ElementAllocator<T>: Clone + PartialEq {
    /// The same allocator family for element type `U`
    type Rebind<U>: ElementAllocator<U>;

    /// Whether clone-assigning a container should also copy its allocator
    const PROPAGATE_ON_CLONE_ASSIGN: bool;
    /// Whether move-assigning a container should also move its allocator
    const PROPAGATE_ON_MOVE_ASSIGN: bool;
    /// Whether swapping containers should also swap their allocators
    const PROPAGATE_ON_SWAP: bool;
    /// Whether every instance compares equal to every other
    const IS_ALWAYS_EQUAL: bool;

    /// Allocates an uninitialized span of `n` elements
    ///
    /// `n == 0` yields an empty span with a dangling pointer, not an error.
    fn allocate(&self, n: usize) -> PoolResult<NonNull<[T]>>;

    /// Returns a span obtained from [`allocate`](Self::allocate)
    ///
    /// # Safety
    /// - `ptr` must come from `allocate(n)` on an allocator equal to `self`
    /// - elements in the span must already be destroyed
    /// - the span must not be used or deallocated again afterwards
    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize);

    /// Produces an allocator for element type `U`
    fn rebind<U>(&self) -> PoolResult<Self::Rebind<U>>;

    /// Largest `n` accepted by [`allocate`](Self::allocate)
    fn max_size(&self) -> usize {
        max_elements::<T>()
    }

    /// Pre-warms storage for `total` elements
    ///
    /// An optional hint; allocators without a notion of reservation accept
    /// and ignore it.
    fn reserve(&self, _total: usize) -> PoolResult<()> {
        Ok(())
    }

    /// Moves `value` into an allocated, uninitialized slot
    ///
    /// # Safety
    /// `ptr` must point at an uninitialized slot inside a live span.
    #[inline]
    unsafe fn construct(&self, ptr: NonNull<T>, value: T) {
        // SAFETY: slot is valid for writes and uninitialized (caller contract).
        unsafe { ptr.as_ptr().write(value) };
    }

    /// Runs the destructor of the element at `ptr`, leaving the slot allocated
    ///
    /// # Safety
    /// `ptr` must point at an initialized element inside a live span.
    #[inline]
    unsafe fn destroy(&self, ptr: NonNull<T>) {
        // SAFETY: element is initialized and not used afterwards (caller contract).
        unsafe { ptr::drop_in_place(ptr.as_ptr()) };
    }
}
