/*!
 * Configuration handling for project-aggregator
 */

use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::error::Result;
use crate::{bail, ensure};

/// Default destination file name
pub const DEFAULT_OUTPUT_FILE: &str = "aggregated_project.txt";

/// What to do with bytes that are not valid UTF-8
///
/// Every policy keeps line endings byte-for-byte: `\r\n` and lone `\r`
/// reach the output untranslated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DecodePolicy {
    /// Drop undecodable bytes silently (default)
    #[default]
    Skip,
    /// Substitute U+FFFD for each invalid sequence
    Replace,
    /// Skip the whole file with a warning
    Strict,
}

/// Command-line arguments for project-aggregator
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "project-aggregator",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aggregate project files into a single file.",
    long_about = "Concatenates every text file tracked by git into one document, prefixed by an index. Hidden paths and binary files are skipped."
)]
pub struct Args {
    /// The directory of the project (default: current directory)
    #[clap(short = 'd', long = "directory")]
    pub directory: Option<PathBuf>,

    /// The output file path and name
    #[clap(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// How to handle file content that is not valid UTF-8
    #[clap(long, value_enum, default_value_t = DecodePolicy::default())]
    pub on_decode_error: DecodePolicy,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Hide the progress bar and the summary table
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration, resolved once at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// Absolute repository root
    pub repo_root: PathBuf,

    /// Destination file
    pub output_file: PathBuf,

    /// Lossy decoding policy for file contents
    pub decode_policy: DecodePolicy,

    /// Show progress bar and summary table
    pub show_progress: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    ///
    /// This is the only place the process working directory is consulted.
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = env::current_dir()?;
        let directory = args.directory.unwrap_or_else(|| cwd.clone());

        Ok(Self {
            repo_root: absolutize(&cwd, &directory),
            output_file: args.output,
            decode_policy: args.on_decode_error,
            show_progress: !args.quiet,
        })
    }

    /// Configuration for an explicit root, with defaults for everything else
    pub fn new(repo_root: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            output_file: output_file.into(),
            decode_policy: DecodePolicy::default(),
            show_progress: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.repo_root.exists(),
            Config,
            "Project directory not found: {}",
            self.repo_root.display()
        );
        ensure!(
            self.repo_root.is_dir(),
            Config,
            "Project path is not a directory: {}",
            self.repo_root.display()
        );

        if self.output_file.as_os_str().is_empty() {
            bail!(Config, "Output file path is empty");
        }

        Ok(())
    }
}

/// Join `path` onto `base` unless it is already absolute
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["project-aggregator"]);
        assert_eq!(args.directory, None);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(args.on_decode_error, DecodePolicy::Skip);
        assert!(!args.quiet);

        let config = Config::from_args(args).unwrap();
        assert!(config.repo_root.is_absolute());
        assert_eq!(config.repo_root, env::current_dir().unwrap());
    }

    #[test]
    fn test_short_and_long_flags() {
        let args = Args::parse_from([
            "project-aggregator",
            "-d",
            "/tmp/project",
            "--output",
            "out.txt",
            "--on-decode-error",
            "replace",
        ]);
        assert_eq!(args.directory, Some(PathBuf::from("/tmp/project")));
        assert_eq!(args.output, PathBuf::from("out.txt"));
        assert_eq!(args.on_decode_error, DecodePolicy::Replace);
    }

    #[test]
    fn test_relative_directory_is_resolved() {
        let resolved = absolutize(Path::new("/work"), Path::new("sub/project"));
        assert_eq!(resolved, PathBuf::from("/work/sub/project"));

        let absolute = absolutize(Path::new("/work"), Path::new("/elsewhere"));
        assert_eq!(absolute, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_validate_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let config = Config::new(dir.path().join("missing"), "out.txt");
        assert!(config.validate().is_err());

        let config = Config::new(dir.path(), "out.txt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_file_as_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = Config::new(&file, "out.txt").validate().unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
