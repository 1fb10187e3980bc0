//! Pool statistics

/// Snapshot of a pool's shape and activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of blocks owned
    pub block_count: usize,
    /// Element capacity of each block, in allocation order
    pub block_sizes: Vec<usize>,
    /// Sum of all block capacities
    pub total_capacity: usize,
    /// Unused elements at the tail of the current block
    pub remaining_in_current: usize,
    /// Slots waiting on the free list
    pub free_list_len: usize,
    /// Successful bump allocations
    pub bump_allocations: u64,
    /// Allocations served from the free list
    pub free_list_hits: u64,
    /// Slots pushed onto the free list
    pub free_list_pushes: u64,
    /// Blocks appended after the initial one
    pub growth_events: u64,
    /// Size of one element in bytes
    pub element_size: usize,
    /// Growth increment in elements
    pub chunk_size: usize,
}

impl PoolStats {
    /// Total capacity in bytes
    pub fn capacity_bytes(&self) -> usize {
        self.total_capacity.saturating_mul(self.element_size)
    }
}
