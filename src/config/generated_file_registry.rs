use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::ext::BestEffortPathExt;

pub const DEFAULT_DECLARATION_FILE_NAME: &str = "generated.yaml";
const DEFAULT_OUTPUT_DIRECTORY: &str = "build/generated";

/// A file declared in the declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFileDeclaration {
    pub file_name: String,
    pub content: String,
    /// Output directory, relative to the project root.
    pub directory: PathBuf,
}

/// The files declared in `generated.yaml`, in declaration order.
#[derive(Debug, Clone)]
pub struct GeneratedFileRegistry {
    files: LinkedHashMap<String, GeneratedFileDeclaration>,
}

impl GeneratedFileRegistry {
    pub async fn from_path(path: PathBuf) -> Result<Self, GeneratedFileRegistryCreationError> {
        debug!("Reading declaration file: {}", path.best_effort_path_display());
        let bytes = compio::fs::read(&path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read declaration file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    pub fn get_file_by_name(&self, name: impl AsRef<str>) -> Option<&GeneratedFileDeclaration> {
        self.files.get(name.as_ref())
    }

    pub fn get_files_iter(&self) -> impl Iterator<Item = &GeneratedFileDeclaration> {
        self.files.values()
    }

    /// Declarations for `names`, or every declaration when `names` is empty.
    pub fn select(
        &self,
        names: &[String],
    ) -> Result<Vec<&GeneratedFileDeclaration>, GeneratedFileRegistryCreationError> {
        if names.is_empty() {
            return Ok(self.get_files_iter().collect());
        }

        names
            .iter()
            .map(|name| {
                self.get_file_by_name(name)
                    .context(UnknownFileSnafu { file_name: name })
            })
            .collect()
    }

    fn parse_files_from_yaml(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        default_directory: &Path,
    ) -> Result<Vec<GeneratedFileDeclaration>, GeneratedFileRegistryCreationError> {
        let files = top_level
            .get(&string_key("files"))
            .unwrap_or(&Yaml::Mapping(LinkedHashMap::new()))
            .as_mapping()
            .ok_or(GeneratedFileRegistryCreationError::FilesNotMap)?
            .iter()
            .filter_map(|(key, value)| {
                if let Yaml::Value(Scalar::String(file_name)) = key {
                    if let Yaml::Mapping(file_data) = value {
                        return Some((file_name, file_data));
                    }
                }
                warn!("Skipping invalid file entry: {:?}", key);
                None
            })
            .filter_map(|(file_name, file_data)| {
                Self::parse_file(file_name, file_data, default_directory).transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(files)
    }

    fn parse_file(
        file_name: &str,
        file_data: &LinkedHashMap<Yaml, Yaml>,
        default_directory: &Path,
    ) -> Result<Option<GeneratedFileDeclaration>, GeneratedFileRegistryCreationError> {
        ensure!(
            is_plain_file_name(file_name),
            InvalidFileNameSnafu { file_name }
        );

        let Some(content) = file_data
            .get(&string_key("content"))
            .and_then(|v| v.as_str())
        else {
            warn!("File '{}' has no string content. Skipping.", file_name);
            return Ok(None);
        };

        let directory = file_data
            .get(&string_key("directory"))
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_directory.to_path_buf());

        Ok(Some(GeneratedFileDeclaration {
            file_name: file_name.to_string(),
            content: content.to_string(),
            directory,
        }))
    }
}

impl TryFrom<&str> for GeneratedFileRegistry {
    type Error = GeneratedFileRegistryCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents)
            .map_err(|e| GeneratedFileRegistryCreationError::ParseError { source: e })?;
        let contents = contents_vec
            .first()
            .ok_or(GeneratedFileRegistryCreationError::MalformedDeclaration)?;

        let top_level = contents
            .as_mapping()
            .ok_or(GeneratedFileRegistryCreationError::TopLevelNotMap)?;

        let default_directory = top_level
            .get(&string_key("directory"))
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_OUTPUT_DIRECTORY);

        let files = Self::parse_files_from_yaml(top_level, Path::new(default_directory))?
            .into_iter()
            .map(|file| (file.file_name.clone(), file))
            .collect::<LinkedHashMap<_, _>>();

        Ok(GeneratedFileRegistry { files })
    }
}

fn string_key(key: &'static str) -> Yaml<'static> {
    Yaml::Value(Scalar::String(Cow::Borrowed(key)))
}

/// A generated tree holds exactly one file, so names may not reach into other directories.
fn is_plain_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\'])
}

#[derive(Debug, Snafu)]
pub enum GeneratedFileRegistryCreationError {
    #[snafu(display("Failed to read the declaration file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The declaration file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the declaration file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted declaration file"))]
    MalformedDeclaration,
    #[snafu(display("Top level of the declaration file should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Files section should be a map"))]
    FilesNotMap,
    #[snafu(display("'{}' is not a plain file name", file_name))]
    InvalidFileName { file_name: String },
    #[snafu(display("File '{}' is not declared", file_name))]
    UnknownFile { file_name: String },
}
