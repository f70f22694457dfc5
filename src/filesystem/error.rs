use std::path::PathBuf;

use snafu::Snafu;

use crate::ext::BestEffortPathExt;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GeneratedFileError {
    #[snafu(display(
        "Failed to generate content for {}",
        path.best_effort_path_display()
    ))]
    GenerationError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write generated file {}", path.best_effort_path_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read file {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read metadata of {}", path.best_effort_path_display()))]
    MetadataError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Unsupported operation on a generated file tree: {}", operation))]
    UnsupportedOperation { operation: &'static str },
}
