//! Standalone error types for arena-pool
//!
//! Uses thiserror for clean, idiomatic Rust error definitions. Every failure
//! is local to the call that raised it: nothing here is retried internally.

use thiserror::Error;

#[cfg(feature = "logging")]
use tracing::{error, warn};

// ============================================================================
// Main Error Types
// ============================================================================

/// Pool allocation errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // --- Configuration Errors ---
    #[error("Invalid pool configuration: {reason}")]
    InvalidConfig { reason: String },

    // --- Range Errors ---
    #[error("Requested {requested} elements exceeds the maximum of {max}")]
    CapacityOverflow { requested: usize, max: usize },

    // --- Out-of-memory Errors ---
    #[error("Block allocation failed: {size} bytes with {align} byte alignment")]
    AllocationFailed { size: usize, align: usize },

    #[error(
        "Fixed-capacity pool cannot serve {requested} elements (chunk size {chunk_size}, {available} left)"
    )]
    FixedCapacityExceeded {
        requested: usize,
        chunk_size: usize,
        available: usize,
    },

    // --- State Errors ---
    #[error("Bump cursor overrun: requested {requested} elements, {remaining} remaining")]
    CursorOverrun { requested: usize, remaining: usize },

    #[error("Pool storage has been released")]
    Released,
}

impl PoolError {
    /// Always `false`: every pool failure is fatal for the request that hit it.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the failure is an out-of-memory condition
    #[must_use]
    pub fn is_out_of_memory(&self) -> bool {
        matches!(
            self,
            Self::AllocationFailed { .. } | Self::FixedCapacityExceeded { .. }
        )
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "POOL:CONFIG:INVALID",
            Self::CapacityOverflow { .. } => "POOL:ALLOC:RANGE",
            Self::AllocationFailed { .. } => "POOL:ALLOC:FAILED",
            Self::FixedCapacityExceeded { .. } => "POOL:ALLOC:FIXED",
            Self::CursorOverrun { .. } => "POOL:STATE:CURSOR",
            Self::Released => "POOL:STATE:RELEASED",
        }
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }

    /// Create range error for a request larger than the element maximum
    #[must_use]
    pub fn capacity_overflow(requested: usize, max: usize) -> Self {
        Self::CapacityOverflow { requested, max }
    }

    /// Create allocation failed error
    pub fn allocation_failed(size: usize, align: usize) -> Self {
        #[cfg(feature = "logging")]
        error!(size, align, "block allocation failed");

        Self::AllocationFailed { size, align }
    }

    /// Create fixed-capacity refusal
    pub fn fixed_capacity_exceeded(requested: usize, chunk_size: usize, available: usize) -> Self {
        #[cfg(feature = "logging")]
        warn!(
            requested,
            chunk_size, available, "fixed-capacity pool refused allocation"
        );

        Self::FixedCapacityExceeded {
            requested,
            chunk_size,
            available,
        }
    }

    /// Create cursor overrun error
    #[must_use]
    pub fn cursor_overrun(requested: usize, remaining: usize) -> Self {
        Self::CursorOverrun {
            requested,
            remaining,
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for pool operations
pub type PoolResult<T> = core::result::Result<T, PoolError>;

/// Generic result type alias
pub type Result<T> = PoolResult<T>;

// ============================================================================
// Tests
// ============================================================================
