//! Arena storage for one element type
//!
//! # Safety
//!
//! `PoolState` owns an ordered list of [`Block`]s and hands out raw slots:
//! - Blocks are only appended, never reordered or freed individually
//! - The bump cursor (`current_block`, `current_offset`) is valid only inside
//!   the block at `current_block`
//! - Slots handed out are never read or dropped by the pool
//! - The free list stores caller-provided pointers without provenance checks
//!
//! ## Invariants
//!
//! - `current_offset + n <= capacity(current_block)` before every bump
//! - Total capacity never decreases while the state is `Active`
//! - `chunk_size > 0` and `element_size` are fixed at construction

use core::ptr::NonNull;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use super::PoolStats;
use crate::core::Block;
use crate::error::{PoolError, PoolResult};

/// Lifecycle phase of a [`PoolState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPhase {
    /// Blocks are owned and allocation is possible
    Active,
    /// All blocks were released; there is no way back
    Released,
}

/// Plain counters; the pool is single-threaded so no atomics are needed
#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    bump_allocations: u64,
    free_list_hits: u64,
    free_list_pushes: u64,
    growth_events: u64,
}

/// Raw storage and bump cursor for elements of type `T`
pub struct PoolState<T> {
    /// Blocks in allocation order
    blocks: Vec<Block<T>>,

    /// Default element count of a new block
    chunk_size: usize,

    /// `size_of::<T>()`, kept for diagnostics
    element_size: usize,

    /// Index of the block the cursor points into
    current_block: usize,

    /// Element offset of the cursor inside the current block
    current_offset: usize,

    /// LIFO stack of recycled single-element slots
    free_list: Vec<NonNull<T>>,

    phase: PoolPhase,
    counters: Counters,
}

impl<T> PoolState<T> {
    /// Creates a pool with one initial block of `chunk_size` elements
    ///
    /// # Errors
    /// - `InvalidConfig` if `chunk_size` is zero
    /// - `AllocationFailed` / `CapacityOverflow` if the first block cannot be acquired
    pub fn new(chunk_size: usize) -> PoolResult<Self> {
        if chunk_size == 0 {
            return Err(PoolError::invalid_config("chunk size must be positive"));
        }

        let mut state = Self {
            blocks: Vec::new(),
            chunk_size,
            element_size: size_of::<T>(),
            current_block: 0,
            current_offset: 0,
            free_list: Vec::new(),
            phase: PoolPhase::Active,
            counters: Counters::default(),
        };
        state.push_block(chunk_size)?;

        #[cfg(feature = "logging")]
        debug!(
            chunk_size,
            element_size = state.element_size,
            "pool created"
        );

        Ok(state)
    }

    /// Growth increment in elements
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Size of one element in bytes
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Current lifecycle phase
    #[inline]
    pub fn phase(&self) -> PoolPhase {
        self.phase
    }

    /// Number of blocks owned
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Element capacity of every block, in allocation order
    pub fn block_sizes(&self) -> Vec<usize> {
        self.blocks.iter().map(Block::capacity).collect()
    }

    /// Sum of every block's capacity
    ///
    /// Saturates at `usize::MAX`, which zero-sized element types can reach.
    pub fn total_capacity(&self) -> usize {
        self.blocks
            .iter()
            .map(Block::capacity)
            .fold(0, usize::saturating_add)
    }

    /// Index of the block the cursor points into
    #[inline]
    pub fn current_block_index(&self) -> usize {
        self.current_block
    }

    /// Unused elements at the tail of the current block
    pub fn remaining_in_current(&self) -> usize {
        self.blocks
            .get(self.current_block)
            .map_or(0, |block| block.capacity() - self.current_offset)
    }

    /// Number of slots waiting on the free list
    #[inline]
    pub fn free_list_len(&self) -> usize {
        self.free_list.len()
    }

    /// Whether `ptr` points into one of this pool's blocks
    pub fn owns(&self, ptr: NonNull<T>) -> bool {
        self.blocks.iter().any(|block| block.contains(ptr))
    }

    /// Appends a block of `count` elements and moves the cursor to its start
    ///
    /// A request for zero elements is a no-op.
    pub fn add_block(&mut self, count: usize) -> PoolResult<()> {
        self.ensure_active()?;
        if count == 0 {
            return Ok(());
        }
        self.push_block(count)?;
        self.current_block = self.blocks.len() - 1;
        self.current_offset = 0;
        Ok(())
    }

    /// Does the current block have at least `n` elements left at the cursor
    pub fn has_capacity(&self, n: usize) -> bool {
        if self.phase == PoolPhase::Released {
            return false;
        }
        self.blocks.get(self.current_block).is_some_and(|block| {
            self.current_offset
                .checked_add(n)
                .is_some_and(|end| end <= block.capacity())
        })
    }

    /// Hands out `n` contiguous slots from the current block
    ///
    /// # Errors
    /// `CursorOverrun` if [`has_capacity`](Self::has_capacity) does not hold.
    /// Callers are expected to check first; the error is never swallowed.
    pub fn bump_allocate(&mut self, n: usize) -> PoolResult<NonNull<T>> {
        self.ensure_active()?;
        if !self.has_capacity(n) {
            return Err(PoolError::cursor_overrun(n, self.remaining_in_current()));
        }

        // SAFETY: current_offset + n <= capacity (checked above), so
        // current_offset is within the block or one past its end.
        let ptr = unsafe { self.blocks[self.current_block].slot(self.current_offset) };
        self.current_offset += n;
        self.counters.bump_allocations += 1;
        Ok(ptr)
    }

    /// Moves the cursor to the first later block that can hold `n` elements
    ///
    /// Later blocks only exist when [`ensure_capacity`](Self::ensure_capacity)
    /// queued them. Blocks that are skipped fall behind the cursor and are
    /// not revisited. Returns whether the cursor moved.
    pub fn advance_to_fitting_block(&mut self, n: usize) -> bool {
        if self.phase == PoolPhase::Released {
            return false;
        }
        let next = (self.current_block + 1..self.blocks.len())
            .find(|&index| self.blocks[index].capacity() >= n);

        match next {
            Some(index) => {
                self.current_block = index;
                self.current_offset = 0;
                true
            },
            None => false,
        }
    }

    /// Capacity the cursor can still reach without growing
    ///
    /// Counts the unused tail of the current block plus the full capacity of
    /// every block after it. Unused tails of blocks *before* the current one
    /// are not counted, so this can under-report what is truly free.
    pub fn available(&self) -> usize {
        self.blocks
            .iter()
            .skip(self.current_block + 1)
            .map(Block::capacity)
            .fold(self.remaining_in_current(), usize::saturating_add)
    }

    /// Makes sure at least `total` elements are reachable without growth
    ///
    /// Appends blocks of `max(chunk_size, shortfall)` after the current one
    /// until the shortfall is covered. The cursor stays where it is; bump
    /// allocation moves into the new blocks once the current one runs out.
    pub fn ensure_capacity(&mut self, total: usize) -> PoolResult<()> {
        if total == 0 {
            return Ok(());
        }
        self.ensure_active()?;

        let available = self.available();
        if available >= total {
            return Ok(());
        }

        let mut shortfall = total - available;
        while shortfall > 0 {
            let count = self.chunk_size.max(shortfall);
            self.push_block(count)?;
            shortfall = shortfall.saturating_sub(count);
        }
        Ok(())
    }

    /// Pushes a released single-element slot onto the free list
    ///
    /// No check is made that `ptr` came from this pool or is not already
    /// listed. Zero-sized slots all share one dangling address, so the same
    /// pointer may legitimately appear more than once.
    pub fn push_free(&mut self, ptr: NonNull<T>) {
        if self.phase == PoolPhase::Released {
            return;
        }
        self.free_list.push(ptr);
        self.counters.free_list_pushes += 1;

        #[cfg(feature = "logging")]
        trace!(free_list_len = self.free_list.len(), "slot recycled");
    }

    /// Pops the most recently released slot, if any
    pub fn pop_free(&mut self) -> Option<NonNull<T>> {
        let ptr = self.free_list.pop()?;
        self.counters.free_list_hits += 1;

        #[cfg(feature = "logging")]
        trace!(free_list_len = self.free_list.len(), "slot reused");

        Some(ptr)
    }

    /// Releases every block, clears the free list and resets the cursor
    ///
    /// Idempotent; runs automatically on drop.
    pub fn release_all(&mut self) {
        if self.phase == PoolPhase::Released {
            return;
        }

        #[cfg(feature = "logging")]
        debug!(
            blocks = self.blocks.len(),
            capacity = self.total_capacity(),
            "releasing pool storage"
        );

        self.blocks.clear();
        self.free_list.clear();
        self.current_block = 0;
        self.current_offset = 0;
        self.phase = PoolPhase::Released;
    }

    /// Snapshot of the pool's shape and counters
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            block_count: self.blocks.len(),
            block_sizes: self.block_sizes(),
            total_capacity: self.total_capacity(),
            remaining_in_current: self.remaining_in_current(),
            free_list_len: self.free_list.len(),
            bump_allocations: self.counters.bump_allocations,
            free_list_hits: self.counters.free_list_hits,
            free_list_pushes: self.counters.free_list_pushes,
            growth_events: self.counters.growth_events,
            element_size: self.element_size,
            chunk_size: self.chunk_size,
        }
    }

    /// Appends a block without touching the cursor
    fn push_block(&mut self, count: usize) -> PoolResult<()> {
        let block = Block::allocate(count)?;

        #[cfg(feature = "logging")]
        debug!(
            index = self.blocks.len(),
            elements = count,
            bytes = block.size_in_bytes(),
            "block added"
        );

        if !self.blocks.is_empty() {
            self.counters.growth_events += 1;
        }
        self.blocks.push(block);
        Ok(())
    }

    fn ensure_active(&self) -> PoolResult<()> {
        match self.phase {
            PoolPhase::Active => Ok(()),
            PoolPhase::Released => Err(PoolError::Released),
        }
    }
}

impl<T> Drop for PoolState<T> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<T> core::fmt::Debug for PoolState<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolState")
            .field("phase", &self.phase)
            .field("chunk_size", &self.chunk_size)
            .field("element_size", &self.element_size)
            .field("blocks", &self.block_sizes())
            .field("current_block", &self.current_block)
            .field("current_offset", &self.current_offset)
            .field("free_list_len", &self.free_list.len())
            .finish()
    }
}
