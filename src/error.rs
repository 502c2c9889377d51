use core::fmt::Debug;

use derive_more::Display;
use thiserror::Error;

/// I/O error, also reported for unrecognized containers
pub const EIO: i32 = 5;
/// Reader not open
pub const EBADF: i32 = 9;
/// Block index or block range out of bounds
pub const ERANGE: i32 = 34;

/// Malformed container, only raised while opening
#[derive(Copy, Clone, Debug, displaydoc::Display, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Not a WBFS container
    BadMagic,
    /// WBFS header truncated
    TruncatedHeader,
    /// Disc directory entry truncated
    TruncatedDiscInfo,
}

/// Header describes sizes this reader cannot work with, only raised while opening
#[derive(Copy, Clone, Debug, displaydoc::Display, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Host sector shift {0} out of range
    HostSectorShift(u8),
    /// WBFS sector shift {0} out of range
    WbfsSectorShift(u8),
    /// WBFS sector shift {wbfs} smaller than host sector shift {host}
    SectorSizeMismatch { host: u8, wbfs: u8 },
    /// Free block bitmap does not fit in the first WBFS sector
    FreeBlockBitmap,
}

#[derive(Copy, Clone, Debug, displaydoc::Display, Error, PartialEq, Eq)]
pub enum InputError {
    /// Block {index} out of range, disc spans {count} blocks
    BlockIndex { index: u32, count: u32 },
    /// Range {offset}+{length} exceeds block size {block_size}
    BlockRange { offset: u32, length: usize, block_size: u32 },
}

#[derive(Copy, Clone, Debug, displaydoc::Display, Error, PartialEq, Eq)]
pub enum OperationError {
    /// Reader is not open
    NotOpen,
    /// No disc at index {0}
    NoSuchDisc(u32),
}

#[derive(Debug, Display, Error)]
pub enum Error<E: Debug> {
    #[display("IO({_0:?})")]
    IO(E),
    #[display("{_0}")]
    Format(#[from] FormatError),
    #[display("{_0}")]
    Geometry(#[from] GeometryError),
    #[display("{_0}")]
    Input(#[from] InputError),
    #[display("{_0}")]
    Operation(#[from] OperationError),
}

impl<E: Debug> Error<E> {
    /// POSIX error number matching this error
    pub fn errno(&self) -> i32 {
        match self {
            Self::Input(_) => ERANGE,
            Self::Operation(OperationError::NotOpen) => EBADF,
            _ => EIO,
        }
    }

    /// Whether the error happened while opening the container,
    /// i.e. the input is not a usable WBFS image
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Geometry(_))
    }
}

#[cfg(feature = "std")]
impl From<Error<std::io::Error>> for std::io::Error {
    fn from(error: Error<std::io::Error>) -> Self {
        use std::io::ErrorKind;
        match error {
            Error::IO(e) => e,
            Error::Format(e) => Self::new(ErrorKind::InvalidData, e),
            Error::Geometry(e) => Self::new(ErrorKind::InvalidData, e),
            Error::Input(e) => Self::new(ErrorKind::InvalidInput, e),
            Error::Operation(e) => Self::new(ErrorKind::Other, e),
        }
    }
}
