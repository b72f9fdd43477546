/*!
 * Reading accepted files as text
 */

use std::fs;

use crate::config::DecodePolicy;
use crate::error::{AggregatorError, Result};
use crate::types::{AcceptedFile, CandidateFile};

/// Reads candidate files and decodes them according to a [`DecodePolicy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentLoader {
    policy: DecodePolicy,
}

impl ContentLoader {
    pub fn new(policy: DecodePolicy) -> Self {
        Self { policy }
    }

    /// Read a candidate into an [`AcceptedFile`]
    ///
    /// Fails with `Read` when the file can't be opened or read and with
    /// `Decode` when the policy is strict and the bytes aren't UTF-8.
    pub fn load(&self, candidate: CandidateFile) -> Result<AcceptedFile> {
        let bytes = fs::read(&candidate.absolute_path).map_err(|source| AggregatorError::Read {
            path: candidate.relative_path.clone().into(),
            source,
        })?;

        match decode(&bytes, self.policy) {
            Some(content) => Ok(AcceptedFile::new(candidate, content)),
            None => Err(AggregatorError::Decode {
                path: candidate.relative_path.into(),
            }),
        }
    }
}

/// Decode bytes as UTF-8. Returns `None` only for invalid input under `Strict`.
pub fn decode(bytes: &[u8], policy: DecodePolicy) -> Option<String> {
    match policy {
        DecodePolicy::Skip => {
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            Some(text)
        }
        DecodePolicy::Replace => Some(String::from_utf8_lossy(bytes).into_owned()),
        DecodePolicy::Strict => String::from_utf8(bytes.to_vec()).ok(),
    }
}
