//! Shared ownership of pool storage
//!
//! A [`PoolHandle`] is a reference-counted pointer to one [`PoolState`].
//! Cloning a handle shares the state; the state's blocks are released when
//! the last handle referencing it is dropped or reset.
//!
//! Handles are `!Send` and `!Sync`. Sharing a pool across threads requires
//! the caller to serialize every operation externally.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use super::{PoolState, PoolStats};
use crate::error::{PoolError, PoolResult};

/// Shared reference to one pool's state
pub struct PoolHandle<T> {
    state: Option<Rc<RefCell<PoolState<T>>>>,
}

impl<T> PoolHandle<T> {
    /// Creates a fresh pool with one block of `chunk_size` elements
    pub fn new(chunk_size: usize) -> PoolResult<Self> {
        Ok(Self::from_state(PoolState::new(chunk_size)?))
    }

    /// Wraps an existing state in a new handle
    pub fn from_state(state: PoolState<T>) -> Self {
        Self {
            state: Some(Rc::new(RefCell::new(state))),
        }
    }

    /// A handle that references no pool
    pub const fn detached() -> Self {
        Self { state: None }
    }

    /// Whether this handle still references a pool
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.state.is_some()
    }

    /// Drops this handle's reference to the pool
    ///
    /// The pool itself is released only when no other handle references it.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Number of handles sharing the pool, `0` for a detached handle
    pub fn reference_count(&self) -> usize {
        self.state.as_ref().map_or(0, Rc::strong_count)
    }

    /// Whether both handles reference the very same pool
    ///
    /// Works across element types; two detached handles compare equal.
    pub fn same_pool<U>(&self, other: &PoolHandle<U>) -> bool {
        self.identity() == other.identity()
    }

    /// Address of the shared state, used for identity comparison
    pub(crate) fn identity(&self) -> Option<usize> {
        self.state
            .as_ref()
            .map(|state| Rc::as_ptr(state).cast::<()>() as usize)
    }

    /// Runs `f` with exclusive access to the state
    ///
    /// # Errors
    /// `Released` if the handle is detached, otherwise whatever `f` returns.
    ///
    /// # Panics
    /// If called re-entrantly from inside `f` on a handle to the same pool.
    pub fn with_state<R>(
        &self,
        f: impl FnOnce(&mut PoolState<T>) -> PoolResult<R>,
    ) -> PoolResult<R> {
        let state = self.state.as_ref().ok_or(PoolError::Released)?;
        f(&mut *state.borrow_mut())
    }

    /// Growth increment of the pool, `None` for a detached handle
    pub fn chunk_size(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.borrow().chunk_size())
    }

    /// Snapshot of the pool's statistics, `None` for a detached handle
    pub fn stats(&self) -> Option<PoolStats> {
        self.state.as_ref().map(|state| state.borrow().stats())
    }
}

impl<T> Clone for PoolHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for PoolHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => f
                .debug_struct("PoolHandle")
                .field("references", &Rc::strong_count(state))
                .field("state", &*state.borrow())
                .finish(),
            None => f.write_str("PoolHandle(detached)"),
        }
    }
}
