/*!
 * The aggregation pipeline: discovery, classification, loading, writing
 *
 * Each stage consumes the full output of the previous one before the next
 * starts. Everything runs on the calling thread.
 */

use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::classifier::Classifier;
use crate::config::Config;
use crate::discovery::{FileSource, GitLsFiles};
use crate::error::Result;
use crate::loader::ContentLoader;
use crate::report::FileReportInfo;
use crate::types::{AcceptedFile, AggregateDocument, CandidateFile, Rejection};
use crate::writer::AggregateWriter;

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Paths reported by discovery
    pub discovered: usize,
    /// Paths dropped by the hidden-path rule
    pub hidden: usize,
    /// Paths dropped by the binary-content rule
    pub binary: usize,
    /// Accepted paths that could not be read or decoded
    pub unreadable: usize,
    /// Total number of lines across included files
    pub total_lines: usize,
    /// Total number of characters across included files
    pub total_chars: usize,
    /// Per-file details, in index order
    pub file_details: Vec<(String, FileReportInfo)>,
}

impl RunStatistics {
    /// Number of files that made it into the document
    pub fn included(&self) -> usize {
        self.file_details.len()
    }

    fn record_rejection(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Hidden => self.hidden += 1,
            Rejection::Binary => self.binary += 1,
        }
    }

    fn record_file(&mut self, file: &AcceptedFile) {
        let info = FileReportInfo::from_content(file.content());
        self.total_lines += info.lines;
        self.total_chars += info.chars;
        self.file_details.push((file.path().to_string(), info));
    }
}

/// Runs one aggregation over a repository
pub struct Aggregator<S = GitLsFiles> {
    config: Config,
    source: S,
    classifier: Classifier,
    loader: ContentLoader,
    writer: AggregateWriter,
    /// Progress bar for the loading stage
    pub progress: Arc<ProgressBar>,
}

impl Aggregator<GitLsFiles> {
    /// Create an aggregator that discovers files with git
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self::with_source(config, GitLsFiles::new(), progress)
    }
}

impl<S: FileSource> Aggregator<S> {
    /// Create an aggregator with a custom file source
    pub fn with_source(config: Config, source: S, progress: Arc<ProgressBar>) -> Self {
        let loader = ContentLoader::new(config.decode_policy);
        Self {
            config,
            source,
            classifier: Classifier::default(),
            loader,
            writer: AggregateWriter::new(),
            progress,
        }
    }

    /// Replace the default classifier
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// List tracked files and number them by discovery position
    pub fn discover(&self) -> Result<Vec<CandidateFile>> {
        let paths = self.source.list_files(&self.config.repo_root)?;
        Ok(CandidateFile::enumerate(&self.config.repo_root, paths))
    }

    /// Drop hidden and binary candidates, keeping the order of the rest
    pub fn classify(
        &self,
        candidates: Vec<CandidateFile>,
        stats: &mut RunStatistics,
    ) -> Vec<CandidateFile> {
        candidates
            .into_iter()
            .filter(|candidate| match self.classifier.rejection(candidate) {
                Some(rejection) => {
                    stats.record_rejection(rejection);
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Read accepted candidates. Unreadable files are skipped with a warning.
    pub fn load(
        &self,
        candidates: Vec<CandidateFile>,
        stats: &mut RunStatistics,
    ) -> Vec<AcceptedFile> {
        self.progress.set_length(candidates.len() as u64);

        let mut files = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            self.progress
                .set_message(format!("Reading {}", candidate.relative_path));

            match self.loader.load(candidate) {
                Ok(file) => {
                    stats.record_file(&file);
                    files.push(file);
                }
                Err(e) => {
                    stats.unreadable += 1;
                    self.progress.suspend(|| warn!("{}", e));
                }
            }

            self.progress.inc(1);
        }

        files
    }

    /// Run discovery, classification and loading into a document
    pub fn build(&self) -> Result<(AggregateDocument, RunStatistics)> {
        let mut stats = RunStatistics::default();

        let candidates = self.discover()?;
        stats.discovered = candidates.len();

        let accepted = self.classify(candidates, &mut stats);
        debug!(
            "{} of {} files passed classification",
            accepted.len(),
            stats.discovered
        );

        let files = self.load(accepted, &mut stats);
        Ok((AggregateDocument::new(files), stats))
    }

    /// Build the document and write it to the configured output file
    pub fn run(&self) -> Result<RunStatistics> {
        let (document, stats) = self.build()?;

        self.progress.set_message("Writing output...");
        self.writer.write(&document, &self.config.output_file)?;
        debug!(
            "Wrote {} files to {}",
            stats.included(),
            self.config.output_file.display()
        );

        Ok(stats)
    }
}
