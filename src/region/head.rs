//! Partition header, first host sector
//!
//! ```text
//! [0x00] Magic "WBFS"                      (4 bytes)
//! [0x04] Number of host sectors            (u32 BE)
//! [0x08] Host sector size shift            (1 byte)
//! [0x09] WBFS sector size shift            (1 byte)
//! [0x0A] Reserved                          (2 bytes)
//! [0x0C] Disc table, one byte per slot     (until end of host sector)
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::endian::Big as BE;
use crate::error::{Error, FormatError, GeometryError};
use crate::geometry::{MAX_SECTOR_SIZE_SHIFT, MIN_SECTOR_SIZE_SHIFT};
use crate::io::{Wrap, IO};
use crate::types::SectorID;

pub(crate) const MAGIC: [u8; 4] = hex!("57 42 46 53");
/// Fixed prefix before the disc table
pub(crate) const HEAD_SIZE: usize = 12;

/// Fixed prefix of the header, valid for any host sector size
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Prefix {
    pub num_sectors: u32,
    pub sector_size_shift: u8,
    pub block_size_shift: u8,
}

impl Prefix {
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEAD_SIZE {
            return Err(FormatError::TruncatedHeader);
        }
        if bytes[..4] != MAGIC {
            return Err(FormatError::BadMagic);
        }
        let num_sectors = BE::<u32>::from_slice(&bytes[4..]).ok_or(FormatError::TruncatedHeader)?;
        Ok(Self {
            num_sectors: num_sectors.to_ne(),
            sector_size_shift: bytes[8],
            block_size_shift: bytes[9],
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Head {
    pub prefix: Prefix,
    /// Whole first host sector
    sector: Vec<u8>,
}

impl Head {
    /// Read assuming 512 byte host sectors first,
    /// then re-read the whole host sector once its real size is known
    pub fn read<E: Debug, T: IO<Error = E>>(io: &mut T) -> Result<Self, Error<E>> {
        let mut sector = vec![0u8; 1 << MIN_SECTOR_SIZE_SHIFT];
        let offset = SectorID::HEAD.offset(MIN_SECTOR_SIZE_SHIFT);
        let size = io.wrap().read_full(offset, &mut sector)?;
        let prefix = Prefix::parse(&sector[..size])?;
        let shift = prefix.sector_size_shift;
        if !(MIN_SECTOR_SIZE_SHIFT..=MAX_SECTOR_SIZE_SHIFT).contains(&shift) {
            return Err(GeometryError::HostSectorShift(shift).into());
        }
        if shift != MIN_SECTOR_SIZE_SHIFT {
            debug!("Host sector size {}, re-reading header", 1u32 << shift);
            sector.resize(1 << shift, 0);
            let size = io.wrap().read_full(SectorID::HEAD.offset(shift), &mut sector)?;
            if size != sector.len() {
                return Err(FormatError::TruncatedHeader.into());
            }
            if Prefix::parse(&sector)? != prefix {
                return Err(FormatError::TruncatedHeader.into());
            }
        } else if size != sector.len() {
            return Err(FormatError::TruncatedHeader.into());
        }
        Ok(Self { prefix, sector })
    }

    /// Presence byte per disc slot, non-zero means occupied
    pub fn disc_table(&self) -> &[u8] {
        &self.sector[HEAD_SIZE..]
    }
}
