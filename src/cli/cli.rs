use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::config::DEFAULT_DECLARATION_FILE_NAME;

/// Materializes generated files, rewriting them only when their content changes.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Names of the declared files to materialize (all when omitted)
    pub files: Vec<String>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The root directory of the project
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// The declaration file, relative to the root
    #[clap(long, short, default_value = DEFAULT_DECLARATION_FILE_NAME)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let cli = Cli::try_parse_from(["gentree"]).expect("Failed to parse arguments");

        assert!(cli.files.is_empty());
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_DECLARATION_FILE_NAME));
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[test]
    fn parses_files_and_options() {
        let cli = Cli::try_parse_from([
            "gentree",
            "MANIFEST.MF",
            "VERSION",
            "--root",
            "project",
            "-c",
            "gen.yaml",
            "-l",
            "silent",
        ])
        .expect("Failed to parse arguments");

        assert_eq!(cli.files, vec!["MANIFEST.MF", "VERSION"]);
        assert_eq!(cli.root, PathBuf::from("project"));
        assert_eq!(cli.config, PathBuf::from("gen.yaml"));
        assert!(cli.log_level.to_tracing_level().is_none());
    }
}
