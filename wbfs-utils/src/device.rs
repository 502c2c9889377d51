use std::io;

use derive_more::Display;
use mbr_nostd::{MasterBootRecord, PartitionTable};
use thiserror::Error;
use wbfs::io::std::FileIO;
use wbfs::io::{Region, IO};

const MBR_SECTOR_SIZE: u64 = 512;

pub type Device = Region<FileIO>;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("{_0}")]
    IO(#[from] io::Error),
    #[display("{_0}")]
    WBFS(#[from] wbfs::error::Error<io::Error>),
    #[display("{_0}")]
    String(&'static str),
}

/// Open a WBFS image, or the WBFS partition `partition` of a partitioned disk
pub fn open(path: &str, partition: Option<usize>) -> Result<Device, Error> {
    let mut io = FileIO::open(path)?;
    let length = io.len();
    let partition = match partition {
        Some(partition) => partition,
        None => return Ok(Region::new(io, 0, length)),
    };
    let mut buffer = [0u8; MBR_SECTOR_SIZE as usize];
    if io.read_at(0, &mut buffer)? != buffer.len() {
        return Err(Error::String("Not MBR"));
    }
    let mbr = MasterBootRecord::from_bytes(&buffer).map_err(|_| Error::String("Not MBR"))?;
    let entries = mbr.partition_table_entries();
    let entry = entries.get(partition).ok_or(Error::String("Partition out of range"))?;
    if entry.sector_count == 0 {
        return Err(Error::String("Invalid partition"));
    }
    let start = entry.logical_block_address as u64 * MBR_SECTOR_SIZE;
    let size = entry.sector_count as u64 * MBR_SECTOR_SIZE;
    log::trace!("Partition offset {} size {}", start, size);
    if start + size > length {
        return Err(Error::String("Partition exceeds device"));
    }
    Ok(Region::new(io, start, size))
}
