use std::cell::Cell;
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;

use crate::filesystem::{FileOperations, LocalFileOperations};

/// Local file operations that count calls and can refuse to read.
#[derive(Debug, Default)]
pub struct RecordingFileOperations {
    unreadable: bool,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl RecordingFileOperations {
    pub fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Self::default()
        }
    }

    pub fn read_attempts(&self) -> usize {
        self.reads.get()
    }

    /// Both direct writes and sinks opened with `create`.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FileOperations for RecordingFileOperations {
    fn exists(&self, path: &Path) -> bool {
        LocalFileOperations.exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);
        if self.unreadable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated read failure",
            ));
        }
        LocalFileOperations.read(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        self.writes.set(self.writes.get() + 1);
        LocalFileOperations.create(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.writes.set(self.writes.get() + 1);
        LocalFileOperations.write(path, contents)
    }

    fn size(&self, path: &Path) -> io::Result<u64> {
        LocalFileOperations.size(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        LocalFileOperations.modified(path)
    }

    fn mode(&self, path: &Path) -> io::Result<u32> {
        LocalFileOperations.mode(path)
    }
}

/// Sets the modification time of `path`, used to observe whether a file got rewritten.
pub fn set_modified(path: &Path, time: SystemTime) {
    std::fs::File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(time))
        .expect("Failed to set modification time");
}
