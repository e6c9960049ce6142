//! Bounded, read-only file access for the scanner.
//!
//! All file reads in a scan go through a `FileSource`, so the walker never
//! opens files directly and tests can substitute failing sources.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Read-only access to file contents.
pub trait FileSource {
    /// Open a file for streaming reads.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Read a whole file into memory.
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        let mut reader = self.open(path)?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        debug!("Opening {:?}", path);
        Ok(Box::new(File::open(path)?))
    }
}

/// A reader that stops after `limit` bytes.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            return Ok(0); // EOF
        }

        let remaining = self.limit - self.bytes_read;
        let max_to_read = std::cmp::min(buf.len() as u64, remaining) as usize;
        let n = self.inner.read(&mut buf[..max_to_read])?;
        self.bytes_read += n as u64;

        if self.bytes_read >= self.limit {
            warn!(
                "BoundedReader limit reached after reading {} bytes",
                self.bytes_read
            );
        }

        Ok(n)
    }
}
