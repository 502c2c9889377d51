use core::fmt::Debug;

use crate::disc::Disc;
use crate::error::{Error, OperationError};
use crate::geometry::Geometry;
use crate::io::IO;
use crate::region::head::Head;

/// Opened WBFS partition with no disc selected yet
pub struct Partition<IO> {
    io: IO,
    head: Head,
    geometry: Geometry,
}

impl<E: Debug, T: IO<Error = E>> Partition<T> {
    /// Parse the partition header through a duplicate of `io`
    pub fn new(io: &T) -> Result<Self, Error<E>> {
        let mut io = io.clone();
        let head = Head::read(&mut io)?;
        let geometry = Geometry::try_from(&head.prefix)?;
        debug!("Partition geometry: {:?}", geometry);
        Ok(Self { io, head, geometry })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Occupied slots, in slot order
    pub fn slots(&self) -> impl Iterator<Item = u32> + '_ {
        let max_discs = self.geometry.max_discs as usize;
        let table = self.head.disc_table();
        let table = &table[..core::cmp::min(max_discs, table.len())];
        table.iter().enumerate().filter(|(_, present)| **present != 0).map(|(slot, _)| slot as u32)
    }

    pub fn num_discs(&self) -> usize {
        self.slots().count()
    }

    /// Open the `index`-th present disc, counting occupied slots only
    pub fn open_disc(self, index: u32) -> Result<Disc<T>, Error<E>> {
        let slot = self.slots().nth(index as usize);
        let slot = slot.ok_or(OperationError::NoSuchDisc(index))?;
        debug!("Disc {} found in slot {}", index, slot);
        Disc::open(self.io, self.geometry, slot)
    }
}

#[cfg(test)]
mod test {
    use super::Partition;
    use crate::error::{Error, FormatError, OperationError};
    use crate::testing::Image;

    #[test]
    fn test_slots() {
        let image = Image::new(9, 21).disc(1, &[1]).disc(4, &[2]).disc(7, &[3]);
        let partition = Partition::new(&image.medium()).unwrap();
        assert_eq!(partition.slots().collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(partition.num_discs(), 3);
        let disc = partition.open_disc(1).unwrap();
        assert_eq!(disc.slot(), 4);
        assert_eq!(disc.table()[0], 2);
    }

    #[test]
    fn test_no_disc() {
        let image = Image::new(9, 21);
        let partition = Partition::new(&image.medium()).unwrap();
        assert_eq!(partition.num_discs(), 0);
        assert!(matches!(
            partition.open_disc(0),
            Err(Error::Operation(OperationError::NoSuchDisc(0)))
        ));
    }

    #[test]
    fn test_slot_beyond_max_discs_ignored() {
        // 32 KiB WBFS sectors only index the first slot
        let image = Image::new(9, 15).num_sectors(0x10000).disc(2, &[1]);
        let partition = Partition::new(&image.medium()).unwrap();
        assert_eq!(partition.geometry().max_discs, 1);
        assert_eq!(partition.num_discs(), 0);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = Image::new(9, 21).head();
        bytes[3] = b'X';
        let io: &[u8] = &bytes;
        let error = Partition::new(&io).err().unwrap();
        assert!(matches!(error, Error::Format(FormatError::BadMagic)));
        assert!(error.is_unrecognized());
    }

    #[test]
    fn test_truncated_disc_info() {
        let bytes = Image::new(9, 21).disc(0, &[1]).head();
        let io: &[u8] = &bytes;
        let partition = Partition::new(&io).unwrap();
        assert!(matches!(
            partition.open_disc(0),
            Err(Error::Format(FormatError::TruncatedDiscInfo))
        ));
    }
}
