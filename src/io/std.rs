use std::fs;
use std::io::prelude::*;
use std::io::{self, SeekFrom};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// WBFS image file or block device.
///
/// Clones share the same file, every read seeks under the lock
/// so clones never disturb each other.
#[derive(Clone, Debug)]
pub struct FileIO {
    file: Arc<Mutex<fs::File>>,
    length: u64,
}

impl FileIO {
    pub fn open<P: AsRef<Path>>(filepath: P) -> io::Result<Self> {
        let mut file = fs::File::open(filepath)?;
        // Block devices report zero metadata length, seek finds the real one
        let length = file.seek(SeekFrom::End(0))?;
        Ok(Self { file: Arc::new(Mutex::new(file)), length })
    }

    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl super::IO for FileIO {
    type Error = io::Error;

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut file = self.file.lock().map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned"))?;
        file.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(size) => filled += size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::FileIO;
    use crate::io::IO;

    #[test]
    fn test_file_io() {
        let path = std::env::temp_dir().join(format!("wbfs-file-io-{}.img", std::process::id()));
        std::fs::File::create(&path).unwrap().write_all(b"0123456789").unwrap();

        let mut io = FileIO::open(&path).unwrap();
        let mut dup = io.clone();
        assert_eq!(io.len(), 10);
        let mut buf = [0u8; 4];
        assert_eq!(io.read_at(6, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"6789");
        assert_eq!(dup.read_at(8, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");
        drop((io, dup));
        std::fs::remove_file(&path).unwrap();
    }
}
