//! In-memory WBFS images for unit tests

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::geometry::{Geometry, DISC_HEADER_SIZE};
use crate::io::IO;
use crate::region::head::{HEAD_SIZE, MAGIC};

/// Medium failure injected at a byte offset
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fault(pub u64);

#[derive(Default)]
struct Inner {
    extents: BTreeMap<u64, Vec<u8>>,
    length: u64,
    reads: Vec<(u64, usize)>,
    fail: Option<u64>,
}

/// Sparse medium, bytes not covered by an extent read as zero.
///
/// Clones share content and the read log.
#[derive(Clone, Default)]
pub struct Medium(Rc<RefCell<Inner>>);

impl Medium {
    pub fn reads(&self) -> Vec<(u64, usize)> {
        self.0.borrow().reads.clone()
    }

    pub fn clear_reads(&self) {
        self.0.borrow_mut().reads.clear();
    }

    /// Fail any read covering `offset`
    pub fn fail_at(&self, offset: u64) {
        self.0.borrow_mut().fail = Some(offset);
    }

    pub fn recover(&self) {
        self.0.borrow_mut().fail = None;
    }
}

impl IO for Medium {
    type Error = Fault;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Fault> {
        let mut inner = self.0.borrow_mut();
        inner.reads.push((offset, buf.len()));
        let end = offset + buf.len() as u64;
        if let Some(fail) = inner.fail.filter(|&fail| offset <= fail && fail < end) {
            return Err(Fault(fail));
        }
        let length = core::cmp::min(buf.len() as u64, inner.length.saturating_sub(offset));
        let buf = &mut buf[..length as usize];
        buf.fill(0);
        let end = offset + length;
        for (&start, data) in inner.extents.iter() {
            let stop = start + data.len() as u64;
            if stop <= offset || start >= end {
                continue;
            }
            let from = core::cmp::max(start, offset);
            let to = core::cmp::min(stop, end);
            let source = &data[(from - start) as usize..(to - start) as usize];
            buf[(from - offset) as usize..(to - offset) as usize].copy_from_slice(source);
        }
        Ok(length as usize)
    }
}

/// Builder of a WBFS partition image
pub struct Image {
    sector_size_shift: u8,
    block_size_shift: u8,
    num_sectors: u32,
    discs: Vec<(u32, Vec<u16>)>,
    blocks: Vec<(u16, Vec<u8>)>,
}

impl Image {
    /// 4 GiB partition by default
    pub fn new(sector_size_shift: u8, block_size_shift: u8) -> Self {
        Self {
            sector_size_shift,
            block_size_shift,
            num_sectors: 0x800000 >> (sector_size_shift - 9),
            discs: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn num_sectors(mut self, num_sectors: u32) -> Self {
        self.num_sectors = num_sectors;
        self
    }

    /// Store a disc in `slot` with the given leading block table entries
    pub fn disc(mut self, slot: u32, table: &[u16]) -> Self {
        self.discs.push((slot, table.to_vec()));
        self
    }

    /// Content of physical block `index`
    pub fn block(mut self, index: u16, data: Vec<u8>) -> Self {
        self.blocks.push((index, data));
        self
    }

    fn geometry(&self) -> Geometry {
        Geometry::new(self.num_sectors, self.sector_size_shift, self.block_size_shift).unwrap()
    }

    /// First host sector only
    pub fn head(&self) -> Vec<u8> {
        let mut sector = vec![0u8; 1 << self.sector_size_shift];
        sector[..4].copy_from_slice(&MAGIC);
        sector[4..8].copy_from_slice(&self.num_sectors.to_be_bytes());
        sector[8] = self.sector_size_shift;
        sector[9] = self.block_size_shift;
        for &(slot, _) in self.discs.iter() {
            sector[HEAD_SIZE + slot as usize] = 1;
        }
        sector
    }

    pub fn medium(&self) -> Medium {
        let geometry = self.geometry();
        let mut inner = Inner {
            length: (self.num_sectors as u64) << self.sector_size_shift,
            ..Default::default()
        };
        inner.extents.insert(0, self.head());
        for (slot, table) in self.discs.iter() {
            let title = alloc::format!("Disc in slot {}", slot);
            let mut bytes = disc_header(b"RTEST0", &title).to_vec();
            for entry in table.iter() {
                bytes.extend_from_slice(&entry.to_be_bytes());
            }
            bytes.resize(geometry.disc_info_size as usize, 0);
            inner.extents.insert(geometry.disc_info_offset(*slot), bytes);
        }
        for (index, data) in self.blocks.iter() {
            inner.extents.insert(geometry.block_offset(*index), data.clone());
        }
        Medium(Rc::new(RefCell::new(inner)))
    }

    /// Whole partition, for writing out as an image file
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; (self.num_sectors as usize) << self.sector_size_shift];
        let size = self.medium().read_at(0, &mut bytes).unwrap();
        assert_eq!(size, bytes.len());
        bytes
    }
}

pub fn pattern(length: usize, seed: u8) -> Vec<u8> {
    (0..length).map(|i| ((i * 31 + seed as usize * 17) % 251) as u8).collect()
}

/// Wii disc header with the given game ID and title
pub fn disc_header(id: &[u8; 6], title: &str) -> [u8; DISC_HEADER_SIZE] {
    let mut header = [0u8; DISC_HEADER_SIZE];
    header[..6].copy_from_slice(id);
    header[0x18..0x1C].copy_from_slice(&hex!("5D 1C 9E A3"));
    let title = title.as_bytes();
    let length = core::cmp::min(title.len(), 0x3F);
    header[0x20..0x20 + length].copy_from_slice(&title[..length]);
    header
}
