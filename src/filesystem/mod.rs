//! A single generated file exposed as a file tree.
//!
//! The file is materialized lazily into a directory supplied by the caller and
//! only rewritten when its generated content actually changes.

mod change_detector;
mod collaborators;
mod error;
mod file_operations;
mod file_tree;
mod generated_file_node;
mod generated_tree;
#[cfg(test)]
mod test_support;

pub use change_detector::{ChangeReason, ContentChange, detect_change};
pub use collaborators::{ContentGenerator, DirectorySource};
pub use error::GeneratedFileError;
pub use file_operations::{FileOperations, LocalFileOperations};
pub use file_tree::{
    ConcreteFileDetails, FileTree, FileVisitDetails, FileVisitor, WatchPoints, read_all,
};
pub use generated_file_node::{GeneratedFileNode, ResolutionOutcome, ResolvedFile};
pub use generated_tree::GeneratedSingletonFileTree;
