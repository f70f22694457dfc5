use std::io::{self, Write};
use std::path::PathBuf;

/// Supplies the directory a generated file is materialized into.
///
/// The returned directory must already exist. Implementations are free to
/// return a different directory on every call.
pub trait DirectorySource {
    fn directory(&self) -> PathBuf;
}

impl<F> DirectorySource for F
where
    F: Fn() -> PathBuf,
{
    fn directory(&self) -> PathBuf {
        self()
    }
}

/// Produces the full content of a generated file into `sink`.
pub trait ContentGenerator {
    fn generate(&self, sink: &mut dyn Write) -> io::Result<()>;
}

impl<F> ContentGenerator for F
where
    F: Fn(&mut dyn Write) -> io::Result<()>,
{
    fn generate(&self, sink: &mut dyn Write) -> io::Result<()> {
        self(sink)
    }
}
