//! Error handling for project-aggregator
//!
//! Fatal errors (`Discovery`, `Write`, `Config`) abort the run. `Read` and
//! `Decode` are per-file and only ever surface as warnings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for aggregation runs
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Listing tracked files failed (not a repository, git missing, ...)
    #[error("Error executing '{command}'. Ensure this is a git repository: {reason}")]
    Discovery { command: String, reason: String },

    /// An accepted file could not be opened or read
    #[error("Could not read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File content is not valid UTF-8 and the decode policy is strict
    #[error("Could not decode file {} as UTF-8", path.display())]
    Decode { path: PathBuf },

    /// The destination could not be created or written
    #[error("Could not write output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for aggregation
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Creates an AggregatorError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::AggregatorError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Allow converting AggregatorError to io::Error for io::Result callers
impl From<AggregatorError> for io::Error {
    fn from(err: AggregatorError) -> Self {
        match err {
            AggregatorError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i32) -> Result<i32> {
        crate::ensure!(n > 0, Config, "expected a positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive number, got -1"
        );
    }

    #[test]
    fn test_discovery_error_names_command() {
        let discovery = AggregatorError::Discovery {
            command: "git ls-files".to_string(),
            reason: "not a git repository".to_string(),
        };
        assert!(discovery.to_string().contains("'git ls-files'"));
        assert!(discovery.to_string().ends_with("not a git repository"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = AggregatorError::Read {
            path: PathBuf::from("src/b.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Could not read file src/b.txt: denied");
    }
}
