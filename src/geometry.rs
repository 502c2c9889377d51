use crate::error::GeometryError;
use crate::region::head::{Prefix, HEAD_SIZE};
use crate::types::SectorID;

pub const MIN_SECTOR_SIZE_SHIFT: u8 = 9;
pub const MAX_SECTOR_SIZE_SHIFT: u8 = 16;
pub const WII_SECTOR_SIZE_SHIFT: u8 = 15;
pub const MAX_BLOCK_SIZE_SHIFT: u8 = 30;
/// Dual layer capacity
pub const WII_SECTORS_PER_DISC: u32 = 143432 * 2;
/// Copy of the disc header leading each directory entry
pub const DISC_HEADER_SIZE: usize = 0x100;

/// Sizes and offsets derived from the partition header.
///
/// "Sector" always means host sector, "block" a WBFS sector,
/// the unit of allocation for disc payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub sector_size_shift: u8,
    pub num_sectors: u32,
    pub num_wii_sectors: u64,
    pub block_size_shift: u8,
    pub num_blocks: u64,
    pub blocks_per_disc: u32,
    /// Directory entry size in bytes, multiple of sector size
    pub disc_info_size: u32,
    pub free_bitmap_lba: u32,
    pub max_discs: u32,
}

impl Geometry {
    pub fn new(
        num_sectors: u32,
        sector_size_shift: u8,
        block_size_shift: u8,
    ) -> Result<Self, GeometryError> {
        if !(MIN_SECTOR_SIZE_SHIFT..=MAX_SECTOR_SIZE_SHIFT).contains(&sector_size_shift) {
            return Err(GeometryError::HostSectorShift(sector_size_shift));
        }
        if !(WII_SECTOR_SIZE_SHIFT..=MAX_BLOCK_SIZE_SHIFT).contains(&block_size_shift) {
            return Err(GeometryError::WbfsSectorShift(block_size_shift));
        }
        if block_size_shift < sector_size_shift {
            let (host, wbfs) = (sector_size_shift, block_size_shift);
            return Err(GeometryError::SectorSizeMismatch { host, wbfs });
        }
        let sector_size = 1u32 << sector_size_shift;
        let num_wii_sectors = (num_sectors as u64 >> WII_SECTOR_SIZE_SHIFT) * sector_size as u64;
        let wii_per_block_shift = block_size_shift - WII_SECTOR_SIZE_SHIFT;
        let num_blocks = num_wii_sectors >> wii_per_block_shift;
        let blocks_per_disc = WII_SECTORS_PER_DISC >> wii_per_block_shift;

        let disc_info_size = DISC_HEADER_SIZE as u32 + blocks_per_disc * 2;
        let disc_info_size = (disc_info_size + sector_size - 1) & !(sector_size - 1);

        let block_size = 1u64 << block_size_shift;
        let bitmap_size = num_blocks / 8;
        let free_bitmap = block_size.checked_sub(bitmap_size).ok_or(GeometryError::FreeBlockBitmap)?;
        let free_bitmap_lba = (free_bitmap >> sector_size_shift) as u32;
        if free_bitmap_lba == 0 {
            return Err(GeometryError::FreeBlockBitmap);
        }

        let disc_info_sectors = disc_info_size >> sector_size_shift;
        let max_discs = (free_bitmap_lba - 1) / disc_info_sectors;
        if max_discs == 0 {
            // Small WBFS sectors cannot hold a directory entry before the bitmap,
            // the first slot is still addressable right after the header
            warn!("Directory entry exceeds first WBFS sector, indexing a single disc");
        }
        let max_discs = max_discs.clamp(1, sector_size - HEAD_SIZE as u32);

        Ok(Self {
            sector_size_shift,
            num_sectors,
            num_wii_sectors,
            block_size_shift,
            num_blocks,
            blocks_per_disc,
            disc_info_size,
            free_bitmap_lba,
            max_discs,
        })
    }

    pub fn sector_size(&self) -> u32 {
        1 << self.sector_size_shift
    }

    pub fn block_size(&self) -> u32 {
        1 << self.block_size_shift
    }

    /// Byte offset of the directory entry of `slot`
    pub fn disc_info_offset(&self, slot: u32) -> u64 {
        let disc_info_sectors = (self.disc_info_size >> self.sector_size_shift) as u64;
        let sector = SectorID::from(1u64) + slot as u64 * disc_info_sectors;
        sector.offset(self.sector_size_shift)
    }

    /// Byte offset of physical block `index`
    pub fn block_offset(&self, index: u16) -> u64 {
        (index as u64) << self.block_size_shift
    }
}

impl TryFrom<&Prefix> for Geometry {
    type Error = GeometryError;

    fn try_from(prefix: &Prefix) -> Result<Self, GeometryError> {
        Self::new(prefix.num_sectors, prefix.sector_size_shift, prefix.block_size_shift)
    }
}
