use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use derive_more::Display;
use snafu::ResultExt;
use tracing::debug;

use crate::ext::{BestEffortPathExt, SystemTimeExt};
use crate::filesystem::change_detector::{ContentChange, detect_change};
use crate::filesystem::error::{
    GenerationSnafu, MetadataSnafu, UnsupportedOperationSnafu, WriteSnafu,
};
use crate::filesystem::{
    ContentGenerator, DirectorySource, FileOperations, FileVisitDetails, GeneratedFileError,
};

/// What resolving a generated file did to the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ResolutionOutcome {
    #[display("created")]
    Created,
    #[display("updated")]
    Updated,
    #[display("up-to-date")]
    UpToDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub size: u64,
    /// Modification time truncated to whole seconds.
    pub last_modified: SystemTime,
    pub outcome: ResolutionOutcome,
}

#[derive(Debug, Clone)]
enum Resolution {
    Unresolved,
    Resolved(ResolvedFile),
}

/// The single leaf of a
/// [`GeneratedSingletonFileTree`](crate::filesystem::GeneratedSingletonFileTree).
///
/// The file is only materialized when something asks for its path, size,
/// modification time or mode. The first of those calls resolves the node;
/// the result is kept for the lifetime of the node.
pub struct GeneratedFileNode<'a> {
    file_name: &'a str,
    directory_source: &'a dyn DirectorySource,
    generator: &'a dyn ContentGenerator,
    file_operations: &'a dyn FileOperations,
    resolution: Resolution,
}

impl<'a> GeneratedFileNode<'a> {
    pub fn new(
        file_name: &'a str,
        directory_source: &'a dyn DirectorySource,
        generator: &'a dyn ContentGenerator,
        file_operations: &'a dyn FileOperations,
    ) -> Self {
        Self {
            file_name,
            directory_source,
            generator,
            file_operations,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }

    /// Materializes the file on first call and returns the memoized result afterwards.
    pub fn resolve(&mut self) -> Result<ResolvedFile, GeneratedFileError> {
        if let Resolution::Resolved(resolved) = &self.resolution {
            return Ok(resolved.clone());
        }

        let resolved = self.materialize()?;
        self.resolution = Resolution::Resolved(resolved.clone());
        Ok(resolved)
    }

    fn materialize(&self) -> Result<ResolvedFile, GeneratedFileError> {
        // The directory source is queried once; every step below uses this path.
        let path = self.directory_source.directory().join(self.file_name);

        let outcome = if !self.file_operations.exists(&path) {
            debug!(
                "Generating {} as it does not exist yet",
                path.best_effort_path_display()
            );
            self.generate_into_file(&path)?;
            ResolutionOutcome::Created
        } else {
            self.update_when_content_changes(&path)?
        };

        let size = self
            .file_operations
            .size(&path)
            .context(MetadataSnafu { path: &path })?;
        let last_modified = self
            .file_operations
            .modified(&path)
            .context(MetadataSnafu { path: &path })?
            .truncate_to_seconds();

        Ok(ResolvedFile {
            path,
            size,
            last_modified,
            outcome,
        })
    }

    fn generate_into_file(&self, path: &Path) -> Result<(), GeneratedFileError> {
        let mut sink = self
            .file_operations
            .create(path)
            .context(WriteSnafu { path })?;
        self.generator
            .generate(sink.as_mut())
            .context(GenerationSnafu { path })?;
        sink.flush().context(WriteSnafu { path })
    }

    fn update_when_content_changes(
        &self,
        path: &Path,
    ) -> Result<ResolutionOutcome, GeneratedFileError> {
        let mut generated = Vec::new();
        self.generator
            .generate(&mut generated)
            .context(GenerationSnafu { path })?;

        match detect_change(&generated, path, self.file_operations) {
            ContentChange::Unchanged => {
                debug!(
                    "Generated content of {} is unchanged, keeping the existing file",
                    path.best_effort_path_display()
                );
                Ok(ResolutionOutcome::UpToDate)
            }
            ContentChange::Changed(reason) => {
                debug!("Rewriting {}: {reason}", path.best_effort_path_display());
                self.file_operations
                    .write(path, &generated)
                    .context(WriteSnafu { path })?;
                Ok(ResolutionOutcome::Updated)
            }
        }
    }
}

impl FileVisitDetails for GeneratedFileNode<'_> {
    fn name(&self) -> &str {
        self.file_name
    }

    fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.file_name)
    }

    fn is_directory(&self) -> bool {
        false
    }

    fn file(&mut self) -> Result<PathBuf, GeneratedFileError> {
        Ok(self.resolve()?.path)
    }

    fn size(&mut self) -> Result<u64, GeneratedFileError> {
        Ok(self.resolve()?.size)
    }

    fn last_modified(&mut self) -> Result<SystemTime, GeneratedFileError> {
        Ok(self.resolve()?.last_modified)
    }

    fn mode(&mut self) -> Result<u32, GeneratedFileError> {
        let path = self.resolve()?.path;
        self.file_operations
            .mode(&path)
            .context(MetadataSnafu { path })
    }

    fn copy_to(&self, sink: &mut dyn Write) -> Result<(), GeneratedFileError> {
        self.generator.generate(sink).context(GenerationSnafu {
            path: self.file_name,
        })
    }

    fn open(&self) -> Result<Box<dyn Read>, GeneratedFileError> {
        UnsupportedOperationSnafu {
            operation: "opening generated content as a stream",
        }
        .fail()
    }

    fn stop_visiting(&mut self) {
        // only one file
    }
}
