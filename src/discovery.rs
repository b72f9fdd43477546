/*!
 * Tracked file discovery
 *
 * Asks git for the files it tracks under the repository root. The listing
 * order is kept as-is and becomes the canonical ordering for indexing.
 */

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{AggregatorError, Result};
use crate::types::RepositoryPath;

/// Something that can list the files of a repository
pub trait FileSource {
    /// Return repository-relative paths in their canonical order
    fn list_files(&self, root: &Path) -> Result<Vec<RepositoryPath>>;
}

/// Lists files with `git ls-files`
#[derive(Debug, Clone)]
pub struct GitLsFiles {
    program: String,
}

impl GitLsFiles {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args() -> [&'static str; 3] {
        ["-c", "core.quotePath=false", "ls-files"]
    }

    fn command_line(&self) -> String {
        format!("{} ls-files", self.program)
    }
}

impl Default for GitLsFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSource for GitLsFiles {
    fn list_files(&self, root: &Path) -> Result<Vec<RepositoryPath>> {
        debug!("Running '{}' in {}", self.command_line(), root.display());

        let output = Command::new(&self.program)
            .args(Self::args())
            .current_dir(root)
            .output()
            .map_err(|e| AggregatorError::Discovery {
                command: self.command_line(),
                reason: format!("failed to spawn {}: {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with status: {}", output.status),
                msg => msg.to_string(),
            };
            return Err(AggregatorError::Discovery {
                command: self.command_line(),
                reason,
            });
        }

        let files = parse_listing(&String::from_utf8_lossy(&output.stdout));
        debug!("Discovered {} tracked files", files.len());
        Ok(files)
    }
}

/// Split newline-separated listing output, dropping empty lines
pub fn parse_listing(stdout: &str) -> Vec<RepositoryPath> {
    stdout
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fixed list of paths, for driving the pipeline without git
#[derive(Debug, Clone, Default)]
pub struct StaticFileSource {
    files: Vec<RepositoryPath>,
}

impl StaticFileSource {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RepositoryPath>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileSource for StaticFileSource {
    fn list_files(&self, _root: &Path) -> Result<Vec<RepositoryPath>> {
        Ok(self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_parse_listing_drops_empty_lines() {
        let files = parse_listing("a.py\n\nsrc/b.txt\n");
        assert_eq!(files, vec!["a.py", "src/b.txt"]);
    }

    #[test]
    fn test_parse_listing_keeps_order_and_duplicates() {
        let files = parse_listing("z.txt\na.txt\nz.txt");
        assert_eq!(files, vec!["z.txt", "a.txt", "z.txt"]);
    }

    #[test]
    fn test_parse_listing_empty_output() {
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn test_static_source() {
        let source = StaticFileSource::new(["a.py", ".gitignore"]);
        let files = source.list_files(Path::new("/nowhere")).unwrap();
        assert_eq!(files, vec!["a.py", ".gitignore"]);
    }

    #[test]
    fn test_missing_program_is_discovery_error() {
        let dir = tempdir().unwrap();
        let source = GitLsFiles::with_program("definitely-not-a-real-git-binary");
        let err = source.list_files(dir.path()).unwrap_err();
        assert!(matches!(err, AggregatorError::Discovery { .. }));
    }

    #[test]
    fn test_non_repository_is_discovery_error() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();

        let inside_repo = Command::new("git")
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        if inside_repo.status.success() {
            return;
        }

        let err = GitLsFiles::new().list_files(dir.path()).unwrap_err();
        assert!(matches!(err, AggregatorError::Discovery { .. }));
    }

    #[test]
    fn test_lists_tracked_files() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        git(dir.path(), &["init", "-q"]);
        fs::write(dir.path().join("a.py"), "print('a')\n").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("b.txt"), "b\n").unwrap();
        fs::write(dir.path().join("untracked.txt"), "u\n").unwrap();
        git(dir.path(), &["add", "a.py", "src/b.txt"]);

        let files = GitLsFiles::new().list_files(dir.path()).unwrap();
        assert_eq!(files, vec!["a.py", "src/b.txt"]);
    }
}
