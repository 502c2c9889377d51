//! Byte addressable view over a source that only knows how to read
//! (part of) one block at a time.
//!
//! A read is split into at most one partial block at the cursor,
//! any number of whole blocks, and at most one trailing partial block.

use core::cell::Cell;
use core::cmp::min;
use core::fmt::Debug;

use crate::error::{Error, OperationError, EBADF};
use crate::types::BlockID;

pub trait BlockSource {
    type Error: Debug;

    fn block_size(&self) -> u32;
    /// Readable size in bytes
    fn size(&self) -> u64;
    /// Caller guarantees `offset + buf.len() <= block_size()`,
    /// implementations still reject violations
    fn read_block(
        &mut self,
        block: BlockID,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<usize, Error<Self::Error>>;
}

/// Seekable reader over a [`BlockSource`].
///
/// Not synchronized, share between threads by giving each its own reader.
pub struct SparseReader<S> {
    source: Option<S>,
    cursor: u64,
    last_error: Cell<i32>,
}

fn read_blocks<E: Debug, S: BlockSource<Error = E>>(
    source: &mut S,
    cursor: u64,
    buf: &mut [u8],
) -> (usize, Option<Error<E>>) {
    let block_size = source.block_size();
    let remain = source.size().saturating_sub(cursor);
    let length = min(buf.len() as u64, remain) as usize;
    let mut buf = &mut buf[..length];
    let mut position = cursor;
    let mut total = 0;
    while !buf.is_empty() {
        let block = BlockID::containing(position, block_size);
        let offset = (position % block_size as u64) as u32;
        let chunk = min(buf.len(), (block_size - offset) as usize);
        let size = match source.read_block(block, offset, &mut buf[..chunk]) {
            Ok(size) => min(size, chunk),
            Err(error) => return (total, Some(error)),
        };
        total += size;
        position += size as u64;
        if size < chunk {
            debug!("Short read on block {}, {} of {} bytes", block, size, chunk);
            break;
        }
        buf = &mut core::mem::take(&mut buf)[chunk..];
    }
    (total, None)
}

impl<E: Debug, S: BlockSource<Error = E>> SparseReader<S> {
    pub fn new(source: S) -> Self {
        Self { source: Some(source), cursor: 0, last_error: Cell::new(0) }
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Drop the source, every later operation fails with `EBADF`
    pub fn close(&mut self) {
        self.source = None;
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// POSIX error number of the last failure, 0 if none
    pub fn last_error(&self) -> i32 {
        self.last_error.get()
    }

    pub fn clear_error(&mut self) {
        self.last_error.set(0);
    }

    fn not_open<T>(&self) -> Result<T, Error<E>> {
        self.last_error.set(EBADF);
        Err(OperationError::NotOpen.into())
    }

    fn readable(&self) -> bool {
        match self.source.as_ref() {
            Some(source) => source.block_size() > 0 && source.size() > 0,
            None => false,
        }
    }

    /// Read up to `buf.len()` bytes at the cursor and advance it.
    ///
    /// Returns fewer bytes at the end of the disc, or when a block came back short.
    /// A failure after some bytes were read is kept in [`Self::last_error`]
    /// and the bytes read so far are returned.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error<E>> {
        if !self.readable() {
            return self.not_open();
        }
        let cursor = self.cursor;
        let (size, error) = match self.source.as_mut() {
            Some(source) => read_blocks(source, cursor, buf),
            None => return self.not_open(),
        };
        self.cursor += size as u64;
        match error {
            Some(error) => {
                warn!("Read failed at {}: {}", cursor + size as u64, error);
                self.last_error.set(error.errno());
                if size > 0 {
                    return Ok(size);
                }
                Err(error)
            }
            None => Ok(size),
        }
    }

    /// Move the cursor, positions out of `[0, size]` saturate
    pub fn seek(&mut self, position: i64) -> Result<u64, Error<E>> {
        if !self.readable() {
            return self.not_open();
        }
        let size = self.source.as_ref().map(|source| source.size()).unwrap_or(0);
        self.cursor = min(position.max(0) as u64, size);
        Ok(self.cursor)
    }

    pub fn rewind(&mut self) -> Result<(), Error<E>> {
        if !self.readable() {
            return self.not_open();
        }
        self.cursor = 0;
        Ok(())
    }

    pub fn tell(&self) -> Result<u64, Error<E>> {
        match self.source {
            Some(_) => Ok(self.cursor),
            None => self.not_open(),
        }
    }

    pub fn size(&self) -> Result<u64, Error<E>> {
        match self.source.as_ref() {
            Some(source) => Ok(source.size()),
            None => self.not_open(),
        }
    }
}

#[cfg(feature = "std")]
impl<S: BlockSource<Error = std::io::Error>> std::io::Read for SparseReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.size().ok() == Some(0) {
            return Ok(0);
        }
        SparseReader::read(self, buf).map_err(Into::into)
    }
}

#[cfg(feature = "std")]
impl<S: BlockSource<Error = std::io::Error>> std::io::Seek for SparseReader<S> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::SeekFrom;

        let size = self.size()?;
        let cursor = self.tell()?;
        let position = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).unwrap_or(i64::MAX),
            SeekFrom::End(delta) => (size as i64).saturating_add(delta),
            SeekFrom::Current(delta) => (cursor as i64).saturating_add(delta),
        };
        if size == 0 {
            return Ok(0);
        }
        Ok(SparseReader::seek(self, position)?)
    }
}
