use std::fmt;

use serde::Serialize;

use crate::block::AllocatedBlock;

/// One line of a memory snapshot: either a live allocation or a free block
/// placed at a synthetic address by the snapshot walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryRegion {
  pub start_address: usize,
  pub size: usize,
  pub free: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub process_name: Option<String>,
}

impl MemoryRegion {
  pub fn free(
    start_address: usize,
    size: usize,
  ) -> Self {
    Self {
      start_address,
      size,
      free: true,
      process_name: None,
    }
  }
}

impl From<&AllocatedBlock> for MemoryRegion {
  fn from(block: &AllocatedBlock) -> Self {
    Self {
      start_address: block.start_address,
      size: block.size,
      free: block.is_free,
      process_name: Some(block.process_name.clone()),
    }
  }
}

impl fmt::Display for MemoryRegion {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(
      f,
      "Start: {}, Size: {}KB, Free: {}",
      self.start_address, self.size, self.free
    )?;

    if let Some(process) = &self.process_name {
      write!(f, ", Process: {}", process)?;
    }

    Ok(())
  }
}
