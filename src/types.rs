/*!
 * Core types and data structures for project-aggregator
 */

use std::path::{Path, PathBuf};

/// Path relative to the repository root, exactly as git reported it
pub type RepositoryPath = String;

/// A discovered path awaiting classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// 1-based position in the full discovery list
    pub index: usize,
    /// Path relative to the repository root
    pub relative_path: RepositoryPath,
    /// Resolved path inside the working directory
    pub absolute_path: PathBuf,
}

impl CandidateFile {
    /// Create a candidate for the `index`-th discovered path under `root`
    pub fn new(root: &Path, index: usize, relative_path: RepositoryPath) -> Self {
        let absolute_path = root.join(&relative_path);
        Self {
            index,
            relative_path,
            absolute_path,
        }
    }

    /// Build candidates for a discovery list, numbering from 1
    pub fn enumerate(root: &Path, paths: Vec<RepositoryPath>) -> Vec<Self> {
        paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| Self::new(root, i + 1, path))
            .collect()
    }
}

/// Reason a candidate was filtered out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Some path segment starts with `.`
    Hidden,
    /// Extension maps to a non-text content type
    Binary,
}

/// A file that passed classification and was read successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    index: usize,
    path: RepositoryPath,
    content: String,
}

impl AcceptedFile {
    pub fn new(candidate: CandidateFile, content: String) -> Self {
        Self {
            index: candidate.index,
            path: candidate.relative_path,
            content,
        }
    }

    /// Position among all discovered paths (not among accepted ones)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// The output artifact: introduction, index and per-file sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateDocument {
    files: Vec<AcceptedFile>,
}

impl AggregateDocument {
    /// Fixed introduction block, without the trailing blank line
    pub const INTRODUCTION: &'static str = "Introduction:\n\
        This file contains the aggregated content of the project files.\n\
        Please review the code and provide any suggestions for improvement.\n";

    /// Assemble a document. Files must already be in increasing index order.
    pub fn new(files: Vec<AcceptedFile>) -> Self {
        debug_assert!(files.windows(2).all(|w| w[0].index < w[1].index));
        Self { files }
    }

    pub fn files(&self) -> &[AcceptedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
