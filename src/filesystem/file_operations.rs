use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;

/// The filesystem calls needed to materialize a generated file.
///
/// Injected into trees rather than reached through `std::fs` directly, so
/// tests can simulate unreadable files and count writes.
pub trait FileOperations {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Opens `path` for writing, truncating any existing content.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn size(&self, path: &Path) -> io::Result<u64>;

    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Unix permission bits of `path`.
    fn mode(&self, path: &Path) -> io::Result<u32>;
}

/// [`FileOperations`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileOperations;

impl FileOperations for LocalFileOperations {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    #[cfg(unix)]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        use std::os::unix::fs::PermissionsExt;

        Ok(fs::metadata(path)?.permissions().mode() & 0o7777)
    }

    #[cfg(not(unix))]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        let readonly = fs::metadata(path)?.permissions().readonly();
        Ok(if readonly { 0o444 } else { 0o644 })
    }
}
