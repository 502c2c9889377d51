use alloc::vec;
use core::fmt::Debug;

use crate::error::{Error, FormatError, InputError};
use crate::geometry::Geometry;
use crate::io::{Wrap, IO};
use crate::partition::Partition;
use crate::region::disc_info::{DiscHeader, DiscInfo};
use crate::sparse::{BlockSource, SparseReader};
use crate::types::BlockID;

/// Disc stored in a WBFS partition, with its block table resident
pub struct Disc<IO> {
    io: IO,
    geometry: Geometry,
    slot: u32,
    info: DiscInfo,
    size: u64,
}

impl<E: Debug, T: IO<Error = E>> Disc<T> {
    pub(crate) fn open(mut io: T, geometry: Geometry, slot: u32) -> Result<Self, Error<E>> {
        let mut bytes = vec![0u8; geometry.disc_info_size as usize];
        let offset = geometry.disc_info_offset(slot);
        let size = io.wrap().read_full(offset, &mut bytes)?;
        if size != bytes.len() {
            return Err(FormatError::TruncatedDiscInfo.into());
        }
        let info = DiscInfo::parse(&bytes, geometry.blocks_per_disc)?;
        let size = match info.table.iter().rposition(|&entry| entry != 0) {
            Some(last) => (last as u64 + 1) << geometry.block_size_shift,
            None => 0,
        };
        debug!("Disc {:?} in slot {} spans {} bytes", info.header, slot, size);
        Ok(Self { io, geometry, slot, info, size })
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn header(&self) -> &DiscHeader {
        &self.info.header
    }

    /// Block table in host order, zero entries are holes
    pub fn table(&self) -> &[u16] {
        &self.info.table
    }

    /// `(logical, physical)` pairs of blocks backed by storage
    pub fn allocated_blocks(&self) -> impl Iterator<Item = (BlockID, u16)> + '_ {
        let table = self.info.table.iter().enumerate();
        table.filter(|(_, physical)| **physical != 0).map(|(index, &physical)| {
            (BlockID::from(index as u32), physical)
        })
    }

    /// Read `buf.len()` bytes of logical block `block` starting at `offset`.
    ///
    /// Holes read as zeros without touching the medium.
    pub fn read_block(
        &mut self,
        block: BlockID,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<usize, Error<E>> {
        let count = self.geometry.blocks_per_disc;
        let physical = match self.info.table.get(block.index()) {
            Some(&physical) => physical,
            None => return Err(InputError::BlockIndex { index: block.into(), count }.into()),
        };
        let block_size = self.geometry.block_size();
        if offset as u64 + buf.len() as u64 > block_size as u64 {
            let length = buf.len();
            return Err(InputError::BlockRange { offset, length, block_size }.into());
        }
        if physical == 0 {
            trace!("Block {} is a hole", block);
            buf.fill(0);
            return Ok(buf.len());
        }
        let address = self.geometry.block_offset(physical) + offset as u64;
        trace!("Block {} mapped to physical {}, reading {} at {}", block, physical, buf.len(), address);
        self.io.wrap().read_full(address, buf)
    }
}

impl<E: Debug, T: IO<Error = E>> BlockSource for Disc<T> {
    type Error = E;

    fn block_size(&self) -> u32 {
        self.geometry.block_size()
    }

    /// Offset just past the last allocated block
    fn size(&self) -> u64 {
        self.size
    }

    fn read_block(&mut self, block: BlockID, offset: u32, buf: &mut [u8]) -> Result<usize, Error<E>> {
        Disc::<T>::read_block(self, block, offset, buf)
    }
}

/// Reader over the first disc of a WBFS partition
pub type WbfsReader<IO> = SparseReader<Disc<IO>>;

impl<E: Debug, T: IO<Error = E>> SparseReader<Disc<T>> {
    /// Open the first present disc through a duplicate of `io`
    pub fn open(io: &T) -> Result<Self, Error<E>> {
        Partition::new(io)?.open_disc(0).map(Self::new)
    }
}
