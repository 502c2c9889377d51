//! Disc directory entry
//!
//! ```text
//! [0x000] Copy of the disc header                 (0x100 bytes)
//! [0x100] Block table, one u16 BE per WBFS sector  (blocks_per_disc entries)
//! [....]  Padding to host sector size
//! ```
//!
//! A block table entry is the physical WBFS sector holding that part
//! of the disc, zero when the disc has no data there.

use alloc::vec::Vec;

use crate::endian::Big as BE;
use crate::error::FormatError;
use crate::geometry::DISC_HEADER_SIZE;

const WII_MAGIC: u32 = 0x5D1C9EA3;
const GAMECUBE_MAGIC: u32 = 0xC2339F3D;
const TITLE_OFFSET: usize = 0x20;
const TITLE_SIZE: usize = 0x40;

/// Header of the stored disc, as found at its first bytes
#[derive(Clone, PartialEq, Eq)]
pub struct DiscHeader([u8; DISC_HEADER_SIZE]);

impl DiscHeader {
    /// Six character game ID, e.g. "RMCE01"
    pub fn game_id(&self) -> &[u8] {
        &self.0[..6]
    }

    pub fn disc_number(&self) -> u8 {
        self.0[6]
    }

    pub fn revision(&self) -> u8 {
        self.0[7]
    }

    pub fn is_wii(&self) -> bool {
        BE::<u32>::from_slice(&self.0[0x18..]).map(|magic| magic.to_ne()) == Some(WII_MAGIC)
    }

    pub fn is_gamecube(&self) -> bool {
        BE::<u32>::from_slice(&self.0[0x1C..]).map(|magic| magic.to_ne()) == Some(GAMECUBE_MAGIC)
    }

    /// NUL terminated title, non-ASCII bytes replaced with '?'
    pub fn title(&self) -> heapless::String<TITLE_SIZE> {
        let mut title = heapless::String::new();
        let bytes = &self.0[TITLE_OFFSET..TITLE_OFFSET + TITLE_SIZE];
        for &byte in bytes.iter().take_while(|&&byte| byte != 0) {
            let ch = if byte.is_ascii() { byte as char } else { '?' };
            if title.push(ch).is_err() {
                break;
            }
        }
        title
    }
}

impl core::fmt::Debug for DiscHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let game_id = core::str::from_utf8(self.game_id()).unwrap_or("??????");
        f.debug_struct("DiscHeader").field("game_id", &game_id).field("title", &self.title()).finish()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DiscInfo {
    pub header: DiscHeader,
    /// Host order
    pub table: Vec<u16>,
}

impl DiscInfo {
    pub fn parse(bytes: &[u8], blocks_per_disc: u32) -> Result<Self, FormatError> {
        let table_size = blocks_per_disc as usize * 2;
        if bytes.len() < DISC_HEADER_SIZE + table_size {
            return Err(FormatError::TruncatedDiscInfo);
        }
        let mut header = [0u8; DISC_HEADER_SIZE];
        header.copy_from_slice(&bytes[..DISC_HEADER_SIZE]);
        let table_bytes = &bytes[DISC_HEADER_SIZE..DISC_HEADER_SIZE + table_size];
        let table = table_bytes
            .chunks_exact(2)
            .filter_map(BE::<u16>::from_slice)
            .map(BE::<u16>::to_ne)
            .collect();
        Ok(Self { header: DiscHeader(header), table })
    }
}
