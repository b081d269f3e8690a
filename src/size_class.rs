use crate::error::{AllocError, Result};

/// Checks whether `$size` sits on the class ladder rooted at `$min`, that
/// is `$size == $min * 2^k` for some `k >= 0`.
///
/// # Examples
///
/// ```rust
/// use quickfit::is_size_class;
///
/// assert!(is_size_class!(16, 4));
/// assert!(!is_size_class!(12, 4));
/// ```
#[macro_export]
macro_rules! is_size_class {
  ($size:expr, $min:expr) => {{
    let size: usize = $size;
    let min: usize = $min;
    min > 0 && size >= min && size % min == 0 && (size / min).is_power_of_two()
  }};
}

/// Builds the size-class ladder: `min_block_size`, doubled while the value
/// stays within `total_memory`.
///
/// ```text
///   min = 4, total = 1024
///
///   4 ─► 8 ─► 16 ─► 32 ─► 64 ─► 128 ─► 256 ─► 512 ─► 1024
/// ```
pub fn class_ladder(
  total_memory: usize,
  min_block_size: usize,
) -> Result<Vec<usize>> {
  if min_block_size == 0 || min_block_size > total_memory {
    return Err(AllocError::InvalidConfiguration {
      total_memory,
      min_block_size,
    });
  }

  let mut classes = Vec::new();
  let mut current = min_block_size;

  while current <= total_memory {
    classes.push(current);
    // Stop instead of wrapping when total_memory is near usize::MAX.
    match current.checked_mul(2) {
      Some(next) => current = next,
      None => break,
    }
  }

  Ok(classes)
}
