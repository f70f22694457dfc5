use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use snafu::ResultExt;

use crate::filesystem::error::{MetadataSnafu, ReadSnafu, UnsupportedOperationSnafu, WriteSnafu};
use crate::filesystem::{FileOperations, GeneratedFileError};

/// An entry handed to a [`FileVisitor`].
///
/// Accessors that depend on the entry's on-disk state take `&mut self`: an
/// entry may need to materialize itself before it can answer.
pub trait FileVisitDetails {
    fn name(&self) -> &str;

    /// Path of the entry relative to the root of the visited tree.
    fn relative_path(&self) -> PathBuf;

    fn is_directory(&self) -> bool;

    fn file(&mut self) -> Result<PathBuf, GeneratedFileError>;

    fn size(&mut self) -> Result<u64, GeneratedFileError>;

    fn last_modified(&mut self) -> Result<SystemTime, GeneratedFileError>;

    fn mode(&mut self) -> Result<u32, GeneratedFileError>;

    /// Writes the entry's content into `sink`.
    fn copy_to(&self, sink: &mut dyn Write) -> Result<(), GeneratedFileError>;

    fn open(&self) -> Result<Box<dyn Read>, GeneratedFileError>;

    fn stop_visiting(&mut self) {}
}

pub trait FileVisitor {
    /// Called for directory entries. Visitors that only understand files keep
    /// the default, which rejects the entry.
    fn visit_dir(&mut self, _details: &mut dyn FileVisitDetails) -> Result<(), GeneratedFileError> {
        UnsupportedOperationSnafu {
            operation: "visiting directories",
        }
        .fail()
    }

    fn visit_file(&mut self, details: &mut dyn FileVisitDetails) -> Result<(), GeneratedFileError>;
}

impl<F> FileVisitor for F
where
    F: FnMut(&mut dyn FileVisitDetails) -> Result<(), GeneratedFileError>,
{
    fn visit_file(&mut self, details: &mut dyn FileVisitDetails) -> Result<(), GeneratedFileError> {
        self(details)
    }
}

/// Filesystem locations whose changes should invalidate a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchPoints {
    roots: Vec<PathBuf>,
}

impl WatchPoints {
    pub fn add(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

pub trait FileTree {
    fn display_name(&self) -> String;

    fn visit(&self, visitor: &mut dyn FileVisitor) -> Result<(), GeneratedFileError>;

    /// Visits only the directory entries of the tree.
    fn visit_directories(&self, visitor: &mut dyn FileVisitor) -> Result<(), GeneratedFileError>;

    fn register_watch_points(&self, watch_points: &mut WatchPoints);

    /// Visits the tree as plain files on disk, materializing them if needed.
    fn visit_tree_or_backing_file(
        &self,
        visitor: &mut dyn FileVisitor,
    ) -> Result<(), GeneratedFileError>;
}

/// Helper shared by visitors that copy an entry into memory.
pub fn read_all(details: &dyn FileVisitDetails) -> Result<Vec<u8>, GeneratedFileError> {
    let mut buffer = Vec::new();
    details.copy_to(&mut buffer)?;
    Ok(buffer)
}

/// A regular file that already exists on disk.
pub struct ConcreteFileDetails {
    path: PathBuf,
    name: String,
    file_operations: Arc<dyn FileOperations>,
}

impl ConcreteFileDetails {
    pub fn new(
        path: PathBuf,
        file_operations: Arc<dyn FileOperations>,
    ) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            file_operations,
        }
    }
}

impl FileVisitDetails for ConcreteFileDetails {
    fn name(&self) -> &str {
        &self.name
    }

    fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.name)
    }

    fn is_directory(&self) -> bool {
        false
    }

    fn file(&mut self) -> Result<PathBuf, GeneratedFileError> {
        Ok(self.path.clone())
    }

    fn size(&mut self) -> Result<u64, GeneratedFileError> {
        self.file_operations
            .size(&self.path)
            .context(MetadataSnafu { path: &self.path })
    }

    fn last_modified(&mut self) -> Result<SystemTime, GeneratedFileError> {
        self.file_operations
            .modified(&self.path)
            .context(MetadataSnafu { path: &self.path })
    }

    fn mode(&mut self) -> Result<u32, GeneratedFileError> {
        self.file_operations
            .mode(&self.path)
            .context(MetadataSnafu { path: &self.path })
    }

    fn copy_to(&self, sink: &mut dyn Write) -> Result<(), GeneratedFileError> {
        let bytes = self
            .file_operations
            .read(&self.path)
            .context(ReadSnafu { path: &self.path })?;
        sink.write_all(&bytes)
            .context(WriteSnafu { path: &self.path })
    }

    fn open(&self) -> Result<Box<dyn Read>, GeneratedFileError> {
        let bytes = self
            .file_operations
            .read(&self.path)
            .context(ReadSnafu { path: &self.path })?;
        Ok(Box::new(std::io::Cursor::new(bytes)))
    }
}
