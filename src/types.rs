use derive_more::{Display, From, Into};

/// Host sector number inside the WBFS partition
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u64);

impl SectorID {
    pub(crate) const HEAD: Self = Self(0);

    pub fn offset(self, sector_size_shift: u8) -> u64 {
        self.0 << sector_size_shift
    }
}

impl<I: Into<u64>> core::ops::Add<I> for SectorID {
    type Output = Self;

    fn add(self, rhs: I) -> Self {
        Self(self.0 + rhs.into())
    }
}

/// Logical block of a virtual disc, in units of the block size
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct BlockID(u32);

impl BlockID {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Block containing the byte at `position`
    pub(crate) fn containing(position: u64, block_size: u32) -> Self {
        Self((position / block_size as u64) as u32)
    }
}
