/*!
 * project-aggregator - Aggregate git-tracked text files into a single document
 *
 * Lists the files a git repository tracks, drops hidden paths and binary
 * content types, and writes the remaining files into one text document
 * prefixed by an index.
 */

pub mod classifier;
pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod writer;


// Re-export main components for easier access
pub use classifier::{Classifier, MimeTable};
pub use config::{Config, DecodePolicy};
pub use discovery::{FileSource, GitLsFiles, StaticFileSource};
pub use error::{AggregatorError, Result};
pub use loader::ContentLoader;
pub use pipeline::{Aggregator, RunStatistics};
pub use report::{FileReportInfo, ReportFormat, Reporter, RunReport};
pub use types::{AcceptedFile, AggregateDocument, CandidateFile, Rejection, RepositoryPath};
pub use writer::AggregateWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
