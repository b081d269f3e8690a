//! # quickfit - A Quick Fit Allocator Simulator
//!
//! This crate simulates a **quick fit** memory allocator: a fixed set of
//! power-of-two size classes, each with its own free list, where a request is
//! served from the smallest class that is large enough.
//!
//! ## Overview
//!
//! ```text
//!   Size Classes (total = 1024KB, min block = 4KB):
//!
//!   ┌───────┬───────┬───────┬───────┬───────┬───────┬───────┬───────┬───────┐
//!   │   4   │   8   │  16   │  32   │  64   │  128  │  256  │  512  │ 1024  │
//!   ├───────┼───────┼───────┼───────┼───────┼───────┼───────┼───────┼───────┤
//!   │ free 1│ free 1│ free 1│ free 1│ free 1│ free 1│ free 1│ free 1│ free 1│
//!   └───────┴───────┴───────┴───────┴───────┴───────┴───────┴───────┴───────┘
//!
//!   request 10KB ──► skip 4, skip 8 ──► take 16 (free 1 → 0)
//!   request 10KB ──► skip 4, skip 8, 16 is empty ──► take 32
//! ```
//!
//! Every allocated block is placed at the address counter, which then moves
//! forward by the block's class size. Nothing is ever freed.
//!
//! ## Crate Structure
//!
//! ```text
//!   quickfit
//!   ├── size_class - Class ladder construction (is_size_class!)
//!   ├── block      - AllocatedBlock record
//!   ├── region     - MemoryRegion snapshot entries
//!   ├── error      - AllocError
//!   └── quick_fit  - QuickFitAllocator implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quickfit::QuickFitAllocator;
//!
//! let mut allocator = QuickFitAllocator::new(1024, 4).unwrap();
//!
//! let allocation = allocator.allocate(10, "P1").unwrap();
//! assert_eq!(allocation.size, 16);
//! assert_eq!(allocation.address, 0);
//!
//! for region in allocator.snapshot() {
//!     println!("{}", region);
//! }
//! ```
//!
//! ## Snapshot Addressing
//!
//! Free blocks have no real position, so a snapshot lays them out after the
//! allocated ones by walking the address counter forward:
//!
//! ```text
//!   next_address = 48
//!
//!   ┌──────┬──────────┬────┬─────┬────────┬─ ─ ─
//!   │ P1   │ P2       │ 4  │  8  │   64   │ ...
//!   └──────┴──────────┴────┴─────┴────────┴─ ─ ─
//!   0      16         48   52    60       124
//! ```
//!
//! In [`AddressMode::Shared`] (the default) the walk is written back to the
//! allocator, so a second snapshot lists the free blocks further up and the
//! next allocation is placed after them. [`AddressMode::Detached`] keeps the
//! walk local.
//!
//! ## Limitations
//!
//! - **No deallocation**: blocks are never returned to their class
//! - **No splitting or coalescing**: a 10KB request consumes a whole 16KB block
//! - **Single-threaded only**: wrap the allocator in a mutex to share it

mod block;
mod error;
mod quick_fit;
mod region;
pub mod size_class;

pub use block::AllocatedBlock;
pub use error::{AllocError, Result};
pub use quick_fit::{AddressMode, Allocation, Config, QuickFitAllocator};
pub use region::MemoryRegion;
