//! Storage sinks that receive encoded containers.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for a finished container.
///
/// A sink opens a handle for a path, receives the bytes through
/// [`Write::write_all`], and is closed exactly once.
pub trait StorageSink {
    /// Writable handle for one open destination.
    type Handle: Write;

    /// Opens (creating or truncating) the destination at `path`.
    fn open(&mut self, path: &Path) -> io::Result<Self::Handle>;

    /// Flushes and releases a handle.
    fn close(&mut self, handle: Self::Handle) -> io::Result<()>;

    /// Removes whatever a failed write left at `path`.
    fn discard(&mut self, path: &Path) -> io::Result<()>;
}

/// Sink backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSink;

impl FileSink {
    /// Creates a filesystem sink.
    pub fn new() -> Self {
        Self
    }
}

impl StorageSink for FileSink {
    type Handle = BufWriter<File>;

    fn open(&mut self, path: &Path) -> io::Result<Self::Handle> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(BufWriter::new(File::create(path)?))
    }

    fn close(&mut self, handle: Self::Handle) -> io::Result<()> {
        let file = handle.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    fn discard(&mut self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory sink keyed by path.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: HashMap<PathBuf, Vec<u8>>,
}

/// Handle returned by [`MemorySink::open`].
#[derive(Debug)]
pub struct MemoryHandle {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Write for MemoryHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MemorySink {
    /// Creates an empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `path`, if a handle for it was closed.
    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl StorageSink for MemorySink {
    type Handle = MemoryHandle;

    fn open(&mut self, path: &Path) -> io::Result<Self::Handle> {
        Ok(MemoryHandle {
            path: path.to_path_buf(),
            bytes: Vec::new(),
        })
    }

    fn close(&mut self, handle: Self::Handle) -> io::Result<()> {
        self.files.insert(handle.path, handle.bytes);
        Ok(())
    }

    fn discard(&mut self, path: &Path) -> io::Result<()> {
        self.files.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_stores_on_close() {
        let mut sink = MemorySink::new();
        let path = Path::new("tone.wav");

        let mut handle = sink.open(path).unwrap();
        handle.write_all(b"RIFF").unwrap();
        assert!(sink.get(path).is_none());

        sink.close(handle).unwrap();
        assert_eq!(sink.get(path), Some(&b"RIFF"[..]));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_memory_sink_discard() {
        let mut sink = MemorySink::new();
        let path = Path::new("tone.wav");
        let handle = sink.open(path).unwrap();
        sink.close(handle).unwrap();

        sink.discard(path).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("out.wav");
        let mut sink = FileSink::new();

        let mut handle = sink.open(&path).unwrap();
        handle.write_all(&[1, 2, 3]).unwrap();
        sink.close(handle).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_file_sink_discard_missing_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new();
        sink.discard(&tmp.path().join("never-written.wav")).unwrap();
    }
}
