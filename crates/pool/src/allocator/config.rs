//! Pool allocator configuration

use crate::error::{PoolError, PoolResult};

/// Default growth increment, in elements
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Configuration for [`PoolAllocator`](super::PoolAllocator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Element count of the initial block and minimum size of every new block
    pub chunk_size: usize,

    /// Whether the pool may append blocks once the current one is exhausted
    pub growable: bool,

    /// Whether single-element deallocations are recycled through a free list
    pub free_list: bool,

    /// Fill pattern byte for freshly bump-allocated memory (for debugging)
    pub alloc_pattern: Option<u8>,
    /// Fill pattern byte for slots pushed onto the free list (for debugging)
    pub dealloc_pattern: Option<u8>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            growable: true,
            free_list: false,
            alloc_pattern: None,
            dealloc_pattern: None,
        }
    }
}

impl PoolConfig {
    /// Fixed-capacity pool: one block of `chunk_size`, never grows
    #[must_use]
    pub fn fixed(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            growable: false,
            ..Self::default()
        }
    }

    /// Growable pool that recycles single-element slots
    #[must_use]
    pub fn recycling(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            free_list: true,
            ..Self::default()
        }
    }

    /// Production configuration - large chunks, no debug patterns
    #[must_use]
    pub fn production() -> Self {
        Self {
            chunk_size: 1024,
            growable: true,
            free_list: true,
            alloc_pattern: None,
            dealloc_pattern: None,
        }
    }

    /// Debug configuration - small chunks, fill patterns on
    #[must_use]
    pub fn debug() -> Self {
        Self {
            chunk_size: 16,
            growable: true,
            free_list: true,
            alloc_pattern: Some(0xBB),
            dealloc_pattern: Some(0xDD),
        }
    }

    /// Set the growth increment
    #[must_use = "builder methods must be chained or built"]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Allow or forbid growth beyond the first block
    #[must_use = "builder methods must be chained or built"]
    pub fn with_growth(mut self, growable: bool) -> Self {
        self.growable = growable;
        self
    }

    /// Enable or disable free-list recycling
    #[must_use = "builder methods must be chained or built"]
    pub fn with_free_list(mut self, free_list: bool) -> Self {
        self.free_list = free_list;
        self
    }

    /// Set the fill pattern for fresh allocations
    #[must_use = "builder methods must be chained or built"]
    pub fn with_alloc_pattern(mut self, pattern: Option<u8>) -> Self {
        self.alloc_pattern = pattern;
        self
    }

    /// Set the fill pattern for recycled slots
    #[must_use = "builder methods must be chained or built"]
    pub fn with_dealloc_pattern(mut self, pattern: Option<u8>) -> Self {
        self.dealloc_pattern = pattern;
        self
    }

    /// Check the configuration before a pool is built from it
    pub fn validate(&self) -> PoolResult<()> {
        if self.chunk_size == 0 {
            return Err(PoolError::invalid_config("chunk size must be positive"));
        }
        Ok(())
    }
}
