#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
extern crate hex_literal;
extern crate heapless;
#[macro_use]
extern crate log;

mod disc;
mod endian;
pub mod error;
pub mod geometry;
pub mod io;
mod partition;
mod region;
mod sparse;
#[cfg(test)]
mod testing;
pub mod types;

pub use disc::{Disc, WbfsReader};
pub use geometry::Geometry;
pub use partition::Partition;
pub use region::disc_info::DiscHeader;
pub use sparse::{BlockSource, SparseReader};

/// Whether `header`, the leading bytes of a medium, looks like a WBFS partition
pub fn is_wbfs(header: &[u8]) -> bool {
    match region::head::Prefix::parse(header) {
        Ok(prefix) => prefix.sector_size_shift >= geometry::MIN_SECTOR_SIZE_SHIFT,
        Err(_) => false,
    }
}
