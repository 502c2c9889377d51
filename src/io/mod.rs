#[cfg(feature = "std")]
pub mod std;

use core::convert::Infallible;
use core::fmt::Debug;

use crate::error::Error;

/// Random access byte source holding a WBFS partition.
///
/// Cloning duplicates the handle, readers keep their own clone and
/// never outlive the underlying medium beyond it.
pub trait IO: Clone {
    type Error: Debug;

    /// Read at most `buf.len()` bytes starting at byte `offset`,
    /// a short count means end of medium
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl IO for &[u8] {
    type Error = Infallible;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let start = core::cmp::min(offset, self.len() as u64) as usize;
        let length = core::cmp::min(buf.len(), self.len() - start);
        buf[..length].copy_from_slice(&self[start..start + length]);
        Ok(length)
    }
}

/// Byte window `[start, start + length)` of another medium,
/// e.g. a WBFS partition inside a partitioned disk
#[derive(Clone, Debug)]
pub struct Region<T> {
    io: T,
    start: u64,
    length: u64,
}

impl<T: IO> Region<T> {
    pub fn new(io: T, start: u64, length: u64) -> Self {
        Self { io, start, length }
    }
}

impl<T: IO> IO for Region<T> {
    type Error = T::Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if offset >= self.length {
            return Ok(0);
        }
        let remain = self.length - offset;
        let length = core::cmp::min(buf.len() as u64, remain) as usize;
        self.io.read_at(self.start + offset, &mut buf[..length])
    }
}

pub(crate) struct Wrapper<'a, T>(&'a mut T);

impl<'a, E: Debug, T: IO<Error = E>> Wrapper<'a, T> {
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Error<E>> {
        self.0.read_at(offset, buf).map_err(|e| Error::IO(e))
    }

    /// Keep reading until `buf` is full or the medium ends
    pub fn read_full(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Error<E>> {
        let mut filled = 0;
        while filled < buf.len() {
            let size = self.read_at(offset + filled as u64, &mut buf[filled..])?;
            if size == 0 {
                break;
            }
            filled += size;
        }
        Ok(filled)
    }
}

pub(crate) trait Wrap: Sized {
    fn wrap(&mut self) -> Wrapper<'_, Self>;
}

impl<T: IO> Wrap for T {
    fn wrap(&mut self) -> Wrapper<'_, Self> {
        Wrapper(self)
    }
}

#[cfg(test)]
mod test {
    use super::{Region, Wrap, IO};

    #[test]
    fn test_slice_read_at() {
        let mut io: &[u8] = &[1, 2, 3, 4, 5];
        let mut buf = [0u8; 4];
        assert_eq!(io.read_at(3, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[4, 5]);
        assert_eq!(io.read_at(9, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_region() {
        let bytes: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        let mut region = Region::new(bytes, 2, 4);
        let mut buf = [0u8; 8];
        assert_eq!(region.read_at(1, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[3, 4, 5]);
        assert_eq!(region.read_at(4, &mut buf).unwrap(), 0);
        assert_eq!(region.wrap().read_full(0, &mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], &[2, 3, 4, 5]);
    }
}
