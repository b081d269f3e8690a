use thiserror::Error;

/// Failures reported by [`QuickFitAllocator`](crate::QuickFitAllocator).
///
/// Both kinds are recoverable: the allocator is left exactly as it was
/// before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
  #[error("invalid configuration: min block size {min_block_size} must be in 1..={total_memory}")]
  InvalidConfiguration {
    total_memory: usize,
    min_block_size: usize,
  },
  #[error("No suitable block found for allocation of {size}KB to {process}.")]
  NoSuitableBlock { size: usize, process: String },
}

pub type Result<T> = std::result::Result<T, AllocError>;
