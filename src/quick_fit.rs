use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
  block::AllocatedBlock,
  error::{AllocError, Result},
  region::MemoryRegion,
  size_class::class_ladder,
};

/// How [`QuickFitAllocator::snapshot`] addresses the free blocks it lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressMode {
  /// The snapshot walk advances the live address counter, so the next real
  /// allocation lands after the last listed free block.
  #[default]
  Shared,
  /// The snapshot walks a private copy of the counter and leaves the
  /// allocator untouched.
  Detached,
}

/// Allocator parameters. Sizes are in kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  pub total_memory: usize,
  pub min_block_size: usize,
  pub address_mode: AddressMode,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      total_memory: 1024,
      min_block_size: 4,
      address_mode: AddressMode::Shared,
    }
  }
}

/// Outcome of a successful [`QuickFitAllocator::allocate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
  pub size: usize,
  pub address: usize,
  pub process: String,
}

impl fmt::Display for Allocation {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(
      f,
      "Allocated {}KB to {} starting at address {}.",
      self.size, self.process, self.address
    )
  }
}

/// Quick-fit allocator simulator.
///
/// Keeps one free count per power-of-two size class and serves each request
/// from the smallest class that is large enough and still has a free block.
/// Blocks are never released.
#[derive(Debug, Clone)]
pub struct QuickFitAllocator {
  total_memory: usize,
  min_block_size: usize,
  address_mode: AddressMode,
  /// Size class -> number of free blocks left in it.
  free_lists: BTreeMap<usize, usize>,
  /// Start address -> block.
  allocated: BTreeMap<usize, AllocatedBlock>,
  next_address: usize,
}

impl Default for QuickFitAllocator {
  fn default() -> Self {
    let config = Config::default();

    Self {
      total_memory: config.total_memory,
      min_block_size: config.min_block_size,
      address_mode: config.address_mode,
      free_lists: Self::fresh_free_lists(
        // The default ladder 4..=1024 cannot fail to build.
        class_ladder(config.total_memory, config.min_block_size).unwrap_or_default(),
      ),
      allocated: BTreeMap::new(),
      next_address: 0,
    }
  }
}

impl QuickFitAllocator {
  pub fn new(
    total_memory: usize,
    min_block_size: usize,
  ) -> Result<Self> {
    Self::with_config(Config {
      total_memory,
      min_block_size,
      ..Config::default()
    })
  }

  pub fn with_config(config: Config) -> Result<Self> {
    let mut allocator = Self {
      total_memory: 0,
      min_block_size: 0,
      address_mode: config.address_mode,
      free_lists: BTreeMap::new(),
      allocated: BTreeMap::new(),
      next_address: 0,
    };

    allocator.initialize(config.total_memory, config.min_block_size)?;

    Ok(allocator)
  }

  fn fresh_free_lists(classes: Vec<usize>) -> BTreeMap<usize, usize> {
    classes.into_iter().map(|size| (size, 1)).collect()
  }

  /// Rebuilds the size classes with one free block each and forgets every
  /// allocation. On error the previous state is kept.
  pub fn initialize(
    &mut self,
    total_memory: usize,
    min_block_size: usize,
  ) -> Result<()> {
    let classes = class_ladder(total_memory, min_block_size)?;

    info!(
      "Initialized quick fit allocator: {}KB total, classes {:?}",
      total_memory, classes
    );

    self.total_memory = total_memory;
    self.min_block_size = min_block_size;
    self.free_lists = Self::fresh_free_lists(classes);
    self.allocated.clear();
    self.next_address = 0;

    Ok(())
  }

  /// Smallest class that fits `size` and still has a free block.
  fn find_suitable_block(
    &self,
    size: usize,
  ) -> Option<usize> {
    self
      .free_lists
      .range(size..)
      .find(|&(_, &free)| free > 0)
      .map(|(&class, _)| class)
  }

  fn no_suitable_block(
    size: usize,
    process_name: &str,
  ) -> AllocError {
    warn!("No suitable block for {}KB requested by {}", size, process_name);
    AllocError::NoSuitableBlock {
      size,
      process: process_name.to_string(),
    }
  }

  pub fn allocate(
    &mut self,
    size: usize,
    process_name: &str,
  ) -> Result<Allocation> {
    let class = match self.find_suitable_block(size) {
      Some(class) if size > 0 => class,
      _ => return Err(Self::no_suitable_block(size, process_name)),
    };

    let address = self.next_address;
    let block = AllocatedBlock::new(address, class, process_name);
    // A block that would run past the end of the address space does not fit.
    let Some(end) = block.end_address() else {
      return Err(Self::no_suitable_block(size, process_name));
    };

    if let Some(free) = self.free_lists.get_mut(&class) {
      *free -= 1;
    }
    self.allocated.insert(address, block);
    self.next_address = end;

    let allocation = Allocation {
      size: class,
      address,
      process: process_name.to_string(),
    };
    info!("{}", allocation);

    Ok(allocation)
  }

  /// Lists allocated blocks by ascending address, followed by one entry per
  /// free block by ascending size class.
  ///
  /// Free blocks get synthetic addresses, walking forward from the current
  /// address counter:
  ///
  /// ```text
  ///   allocated                 free (synthetic)
  ///   ┌────────┬──────────────┬────┬────────┬──────────────── ─ ─
  ///   │ P1 16  │    P2 32     │ 4  │   8    │      64 ...
  ///   └────────┴──────────────┴────┴────────┴──────────────── ─ ─
  ///   0        16             48   52       60
  /// ```
  ///
  /// With [`AddressMode::Shared`] the counter keeps the walk's end position,
  /// so each call moves the free segment (and the next allocation) further
  /// up. With [`AddressMode::Detached`] the call has no side effects.
  ///
  /// The walk saturates at `usize::MAX`; once the counter is pinned there
  /// every later allocation fails with [`AllocError::NoSuitableBlock`].
  pub fn snapshot(&mut self) -> Vec<MemoryRegion> {
    let mut regions: Vec<MemoryRegion> = self.allocated.values().map(MemoryRegion::from).collect();
    let mut address = self.next_address;

    for (&size, &free) in &self.free_lists {
      for _ in 0..free {
        let end = address.saturating_add(size);
        debug!("Free {}KB block placed at {}..{}", size, address, end);
        regions.push(MemoryRegion::free(address, size));
        address = end;
      }
    }

    if self.address_mode == AddressMode::Shared {
      self.next_address = address;
    }

    regions
  }

  pub fn size_classes(&self) -> impl Iterator<Item = usize> + '_ {
    self.free_lists.keys().copied()
  }

  /// Free blocks left in `size`'s class, `None` if it is not a class.
  pub fn free_count(
    &self,
    size: usize,
  ) -> Option<usize> {
    self.free_lists.get(&size).copied()
  }

  pub fn free_lists(&self) -> &BTreeMap<usize, usize> {
    &self.free_lists
  }

  /// Allocated blocks in ascending address order.
  pub fn allocated(&self) -> impl Iterator<Item = &AllocatedBlock> {
    self.allocated.values()
  }

  pub fn allocation_count(&self) -> usize {
    self.allocated.len()
  }

  pub fn next_address(&self) -> usize {
    self.next_address
  }

  pub fn total_memory(&self) -> usize {
    self.total_memory
  }

  pub fn min_block_size(&self) -> usize {
    self.min_block_size
  }

  pub fn address_mode(&self) -> AddressMode {
    self.address_mode
  }
}
