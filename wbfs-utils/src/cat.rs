use std::io;

use wbfs::WbfsReader;

use crate::device::{Device, Error};

pub fn cat(device: &Device) -> Result<(), Error> {
    let mut reader = WbfsReader::open(device)?;
    let mut stdout = io::stdout().lock();
    io::copy(&mut reader, &mut stdout)?;
    Ok(())
}
