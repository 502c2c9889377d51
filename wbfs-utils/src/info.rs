use wbfs::{BlockSource, Partition};

use crate::device::{Device, Error};

pub fn info(device: &Device) -> Result<(), Error> {
    let partition = Partition::new(device)?;
    let geometry = *partition.geometry();
    println!("Host sector size: {}", geometry.sector_size());
    println!("Host sectors:     {}", geometry.num_sectors);
    println!("WBFS sector size: {}", geometry.block_size());
    println!("WBFS sectors:     {}", geometry.num_blocks);
    println!("Disc slots:       {}", geometry.max_discs);
    let num_discs = partition.num_discs();
    println!("Discs:            {}", num_discs);
    if num_discs == 0 {
        return Ok(());
    }

    let disc = partition.open_disc(0)?;
    let header = disc.header();
    println!();
    println!("Slot:             {}", disc.slot());
    println!("Game ID:          {}", String::from_utf8_lossy(header.game_id()));
    println!("Title:            {}", header.title());
    println!("Disc number:      {}", header.disc_number());
    println!("Revision:         {}", header.revision());
    let platform = match (header.is_wii(), header.is_gamecube()) {
        (true, _) => "Wii",
        (_, true) => "GameCube",
        _ => "Unknown",
    };
    println!("Platform:         {}", platform);
    println!("Size:             {}", disc.size());
    println!("Allocated blocks: {}", disc.allocated_blocks().count());
    Ok(())
}
