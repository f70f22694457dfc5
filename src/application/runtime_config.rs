use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    /// Declaration file, relative to `root` unless absolute.
    pub declaration_file: PathBuf,
    /// Files to materialize; empty means every declared file.
    pub files: Vec<String>,
}

impl RuntimeConfig {
    pub fn declaration_path(&self) -> PathBuf {
        self.root.join(&self.declaration_file)
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            declaration_file: cli.config,
            files: cli.files,
        }
    }
}
