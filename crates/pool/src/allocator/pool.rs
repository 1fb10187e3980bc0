//! Arena-backed allocator front-end
//!
//! A [`PoolAllocator`] is a cheap value: a [`PoolHandle`] plus a
//! [`PoolConfig`]. Clones share the handle and therefore the arena; every
//! policy decision (growth, fixed capacity, free-list reuse) is made here and
//! turned into calls on the underlying [`PoolState`](crate::pool::PoolState).
//!
//! # Equality
//!
//! Two allocators are equal iff they reference the same pool. Policy is not
//! compared: two fresh allocators with identical configs are unequal.
//!
//! # Rebind
//!
//! [`rebind`](ElementAllocator::rebind) copies the policy but always builds a
//! brand-new, independent pool for the new element type. There is no storage
//! inheritance across element-type rebind; clone the allocator to share.

use core::any::type_name;
use core::fmt;
use core::ptr::NonNull;

#[cfg(feature = "logging")]
use tracing::debug;

use super::{ElementAllocator, PoolConfig};
use crate::error::{PoolError, PoolResult};
use crate::pool::{PoolHandle, PoolStats};

/// Arena allocator handing out spans of `T` from a shared pool
pub struct PoolAllocator<T> {
    handle: PoolHandle<T>,
    config: PoolConfig,
}

impl<T> PoolAllocator<T> {
    /// Creates an allocator over a fresh pool with the default config
    pub fn new() -> PoolResult<Self> {
        Self::with_config(PoolConfig::default())
    }

    /// Creates an allocator over a fresh pool
    ///
    /// # Errors
    /// `InvalidConfig` for a zero chunk size, or any error acquiring the
    /// initial block.
    pub fn with_config(config: PoolConfig) -> PoolResult<Self> {
        config.validate()?;
        let handle = PoolHandle::new(config.chunk_size)?;
        Ok(Self { handle, config })
    }

    /// Binds a new front-end to an existing pool
    ///
    /// The pool's own chunk size wins over `config.chunk_size`; growth and
    /// free-list policy come from `config`.
    pub fn from_handle(handle: PoolHandle<T>, mut config: PoolConfig) -> Self {
        if let Some(chunk_size) = handle.chunk_size() {
            config.chunk_size = chunk_size;
        }
        Self { handle, config }
    }

    /// The shared pool handle
    #[inline]
    pub fn handle(&self) -> &PoolHandle<T> {
        &self.handle
    }

    /// The policy this front-end applies
    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Snapshot of the pool, `None` if the handle is detached
    pub fn stats(&self) -> Option<PoolStats> {
        self.handle.stats()
    }

    /// Whether `ptr` points into this allocator's pool
    pub fn owns(&self, ptr: NonNull<T>) -> bool {
        self.handle.with_state(|state| Ok(state.owns(ptr))).unwrap_or(false)
    }

    fn allocate_slots(&self, n: usize) -> PoolResult<NonNull<T>> {
        let config = self.config;
        self.handle.with_state(|state| {
            if config.free_list && n == 1 {
                if let Some(ptr) = state.pop_free() {
                    return Ok(ptr);
                }
            }

            if !state.has_capacity(n) {
                if !config.growable {
                    return Err(PoolError::fixed_capacity_exceeded(
                        n,
                        state.chunk_size(),
                        state.remaining_in_current(),
                    ));
                }
                // blocks queued by reserve come first
                if !state.advance_to_fitting_block(n) {
                    state.add_block(n.max(state.chunk_size()))?;
                }
            }

            let ptr = state.bump_allocate(n)?;
            if let Some(pattern) = config.alloc_pattern {
                // SAFETY: the n slots at ptr were just carved out of a live block.
                unsafe { ptr.as_ptr().write_bytes(pattern, n) };
            }
            Ok(ptr)
        })
    }
}

impl<T> ElementAllocator<T> for PoolAllocator<T> {
    type Rebind<U> = PoolAllocator<U>;

    const PROPAGATE_ON_CLONE_ASSIGN: bool = true;
    const PROPAGATE_ON_MOVE_ASSIGN: bool = true;
    const PROPAGATE_ON_SWAP: bool = true;
    const IS_ALWAYS_EQUAL: bool = false;

    fn allocate(&self, n: usize) -> PoolResult<NonNull<[T]>> {
        if n == 0 {
            return Ok(NonNull::slice_from_raw_parts(NonNull::dangling(), 0));
        }
        let max = self.max_size();
        if n > max {
            return Err(PoolError::capacity_overflow(n, max));
        }

        let ptr = self.allocate_slots(n)?;
        Ok(NonNull::slice_from_raw_parts(ptr, n))
    }

    /// Recycles single-element spans when the free list is enabled
    ///
    /// Everything else is a no-op: memory goes back to the system only when
    /// the whole pool is torn down.
    unsafe fn deallocate(&self, ptr: NonNull<T>, n: usize) {
        if !self.config.free_list || n != 1 {
            return;
        }
        let pattern = self.config.dealloc_pattern;
        let recycled = self.handle.with_state(|state| {
            if let Some(pattern) = pattern {
                // SAFETY: ptr is a dead single-element span of this pool (caller contract).
                unsafe { ptr.as_ptr().write_bytes(pattern, 1) };
            }
            state.push_free(ptr);
            Ok(())
        });
        // a detached handle has nothing to recycle into
        if let Err(err) = recycled {
            debug_assert_eq!(err, PoolError::Released);
        }
    }

    fn rebind<U>(&self) -> PoolResult<PoolAllocator<U>> {
        if !self.handle.is_valid() {
            return Ok(PoolAllocator {
                handle: PoolHandle::detached(),
                config: self.config,
            });
        }

        #[cfg(feature = "logging")]
        debug!(
            from = type_name::<T>(),
            to = type_name::<U>(),
            "rebind creates an independent pool"
        );

        PoolAllocator::with_config(self.config)
    }

    /// Makes sure `total` elements can be served without further growth
    ///
    /// Growable pools append blocks after the current one. Fixed-capacity
    /// pools never grow and report `FixedCapacityExceeded` if `total` is out
    /// of reach.
    fn reserve(&self, total: usize) -> PoolResult<()> {
        let growable = self.config.growable;
        self.handle.with_state(|state| {
            if growable {
                return state.ensure_capacity(total);
            }
            let available = state.available();
            if available >= total {
                Ok(())
            } else {
                Err(PoolError::fixed_capacity_exceeded(
                    total,
                    state.chunk_size(),
                    available,
                ))
            }
        })
    }
}

impl<T> Clone for PoolAllocator<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            config: self.config,
        }
    }
}

impl<T, U> PartialEq<PoolAllocator<U>> for PoolAllocator<T> {
    fn eq(&self, other: &PoolAllocator<U>) -> bool {
        self.handle.same_pool(&other.handle)
    }
}

impl<T> Eq for PoolAllocator<T> {}

impl<T> fmt::Debug for PoolAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolAllocator")
            .field("element", &type_name::<T>())
            .field("config", &self.config)
            .field("handle", &self.handle)
            .finish()
    }
}
