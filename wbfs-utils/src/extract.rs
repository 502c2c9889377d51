use std::fs::File;
use std::io::{self, BufWriter, Write};

use wbfs::WbfsReader;

use crate::device::{Device, Error};

pub fn extract(device: &Device, output: &str) -> Result<(), Error> {
    let mut reader = WbfsReader::open(device)?;
    if let Some(disc) = reader.source() {
        let header = disc.header();
        log::info!("Extracting {} ({})", header.title(), String::from_utf8_lossy(header.game_id()));
    }
    let mut writer = BufWriter::new(File::create(output)?);
    let size = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    log::info!("{} bytes written to {}", size, output);
    Ok(())
}
