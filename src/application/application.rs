use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::config::{
    GeneratedFileDeclaration, GeneratedFileRegistry, GeneratedFileRegistryCreationError,
};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{
    FileTree, GeneratedFileError, GeneratedSingletonFileTree, ResolvedFile, WatchPoints,
};

pub struct Application;

impl Application {
    /// Materializes the declared files one after another.
    pub async fn run(
        runtime_config: impl Into<RuntimeConfig>,
    ) -> Result<Vec<ResolvedFile>, ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let registry = GeneratedFileRegistry::from_path(runtime_config.declaration_path())
            .await
            .context(RegistrySnafu)?;
        debug!("Loaded declarations: {:?}", registry);

        let declarations = registry
            .select(&runtime_config.files)
            .context(RegistrySnafu)?;

        let mut watch_points = WatchPoints::default();
        let mut resolved_files = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let tree = Self::tree_for(&runtime_config.root, declaration);
            tree.register_watch_points(&mut watch_points);

            let resolved = tree.resolve().context(MaterializationSnafu {
                file_name: declaration.file_name.clone(),
            })?;
            info!(
                "{} {} ({} bytes)",
                resolved.outcome,
                resolved.path.best_effort_path_display(),
                resolved.size
            );
            resolved_files.push(resolved);
        }
        debug!("Registered watch points: {:?}", watch_points.roots());

        Ok(resolved_files)
    }

    fn tree_for(root: &Path, declaration: &GeneratedFileDeclaration) -> GeneratedSingletonFileTree {
        let directory = root.join(&declaration.directory);
        let content = declaration.content.clone();

        GeneratedSingletonFileTree::new(
            Arc::new(move || Self::ensure_directory(&directory)),
            declaration.file_name.clone(),
            Arc::new(move |sink: &mut dyn Write| sink.write_all(content.as_bytes())),
        )
    }

    /// Creates the output directory on demand; a failure surfaces later as a write error.
    fn ensure_directory(directory: &Path) -> PathBuf {
        if let Err(err) = std::fs::create_dir_all(directory) {
            warn!(
                "Failed to create output directory {}: {err}",
                directory.best_effort_path_display()
            );
        }
        directory.to_path_buf()
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading the declaration file"))]
    RegistryError {
        source: GeneratedFileRegistryCreationError,
    },
    #[snafu(display("Failed to materialize generated file '{}'", file_name))]
    MaterializationError {
        file_name: String,
        source: GeneratedFileError,
    },
}
