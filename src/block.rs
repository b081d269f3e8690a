use serde::Serialize;

/// A block handed out by the allocator. Records are only ever created,
/// so `is_free` is always `false` for an entry of the allocated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedBlock {
  pub start_address: usize,
  pub size: usize,
  pub process_name: String,
  pub is_free: bool,
}

impl AllocatedBlock {
  pub fn new(
    start_address: usize,
    size: usize,
    process_name: impl Into<String>,
  ) -> Self {
    Self {
      start_address,
      size,
      process_name: process_name.into(),
      is_free: false,
    }
  }

  /// First address past the block, `None` if that overflows `usize`.
  pub fn end_address(&self) -> Option<usize> {
    self.start_address.checked_add(self.size)
  }
}
