use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::filesystem::error::UnsupportedOperationSnafu;
use crate::filesystem::{
    ConcreteFileDetails, ContentGenerator, DirectorySource, FileOperations, FileTree, FileVisitor,
    GeneratedFileError, GeneratedFileNode, LocalFileOperations, ResolvedFile, WatchPoints,
};

/// A file tree containing exactly one file whose content is generated.
///
/// The file lives in a directory obtained from a [`DirectorySource`] and is
/// only rewritten when the generated bytes differ from what is already on
/// disk, so consumers keyed on modification times do not see spurious changes.
pub struct GeneratedSingletonFileTree {
    file_name: String,
    directory_source: Arc<dyn DirectorySource>,
    generator: Arc<dyn ContentGenerator>,
    file_operations: Arc<dyn FileOperations>,
}

impl GeneratedSingletonFileTree {
    pub fn new(
        directory_source: Arc<dyn DirectorySource>,
        file_name: impl Into<String>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            directory_source,
            generator,
            file_operations: Arc::new(LocalFileOperations),
        }
    }

    pub fn with_file_operations(mut self, file_operations: Arc<dyn FileOperations>) -> Self {
        self.file_operations = file_operations;
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Materializes the file if needed and returns its path.
    pub fn file(&self) -> Result<PathBuf, GeneratedFileError> {
        Ok(self.resolve()?.path)
    }

    /// Materializes the file if needed, reporting what happened on disk.
    ///
    /// Every call resolves a fresh node, so the generator runs again; the file
    /// itself is only rewritten when the generated bytes differ.
    pub fn resolve(&self) -> Result<ResolvedFile, GeneratedFileError> {
        self.node().resolve()
    }

    /// The path the file would be materialized at, without generating anything.
    pub fn file_without_creating(&self) -> PathBuf {
        self.directory_source.directory().join(&self.file_name)
    }

    fn node(&self) -> GeneratedFileNode<'_> {
        GeneratedFileNode::new(
            &self.file_name,
            self.directory_source.as_ref(),
            self.generator.as_ref(),
            self.file_operations.as_ref(),
        )
    }
}

impl FileTree for GeneratedSingletonFileTree {
    fn display_name(&self) -> String {
        "file tree".to_string()
    }

    fn visit(&self, visitor: &mut dyn FileVisitor) -> Result<(), GeneratedFileError> {
        debug!("Visiting generated file '{}'", self.file_name);
        let mut node = self.node();
        visitor.visit_file(&mut node)
    }

    fn visit_directories(&self, _visitor: &mut dyn FileVisitor) -> Result<(), GeneratedFileError> {
        UnsupportedOperationSnafu {
            operation: "visiting directories of a single generated file",
        }
        .fail()
    }

    fn register_watch_points(&self, _watch_points: &mut WatchPoints) {
        // Generated content has no source on disk to watch.
    }

    fn visit_tree_or_backing_file(
        &self,
        visitor: &mut dyn FileVisitor,
    ) -> Result<(), GeneratedFileError> {
        let path = self.file()?;
        let mut details = ConcreteFileDetails::new(path, self.file_operations.clone());
        visitor.visit_file(&mut details)
    }
}
