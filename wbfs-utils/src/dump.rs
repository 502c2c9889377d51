use wbfs::WbfsReader;

use crate::device::{Device, Error};

pub fn dump(device: &Device, offset: u64, length: usize) -> Result<(), Error> {
    let mut reader = WbfsReader::open(device)?;
    let offset = i64::try_from(offset).map_err(|_| Error::String("Offset out of range"))?;
    let position = reader.seek(offset)?;
    let mut buf = vec![0u8; length];
    let size = reader.read(&mut buf)?;
    println!("Offset {:#x}, {} bytes", position, size);
    println!("{}", pretty_hex::pretty_hex(&&buf[..size]));
    Ok(())
}
