/*!
 * Hidden-path and binary-content classification
 *
 * Both checks look only at the path string. File bytes are never opened
 * here, so a `.png` that happens to contain valid UTF-8 is still binary.
 */

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::types::{CandidateFile, Rejection};

/// Whether any segment of a repository-relative path starts with `.`
pub fn is_hidden(relative_path: &str) -> bool {
    relative_path.starts_with('.') || relative_path.contains("/.")
}

/// Extension to MIME type mapping used for binary detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// A table with no entries; every file counts as text
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Add or replace the MIME type for an extension (without the dot)
    pub fn with_entry(mut self, extension: &str, mime: &str) -> Self {
        self.types.insert(extension.to_string(), mime.to_string());
        self
    }

    /// Guess the MIME type of a path from its final extension
    ///
    /// An exact match wins; otherwise the lowercased extension is tried.
    pub fn guess(&self, path: &str) -> Option<&str> {
        let extension = Path::new(path).extension()?.to_str()?;

        self.types
            .get(extension)
            .or_else(|| self.types.get(&extension.to_lowercase()))
            .map(String::as_str)
    }

    /// Whether the path maps to a type outside the `text/` category.
    /// Unknown extensions are not binary.
    pub fn is_binary(&self, path: &str) -> bool {
        self.guess(path)
            .map(|mime| !mime.starts_with("text/"))
            .unwrap_or(false)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for MimeTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
                .collect(),
        }
    }
}

/// Decides which discovered files make it into the document
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    mime_table: MimeTable,
}

impl Classifier {
    pub fn new(mime_table: MimeTable) -> Self {
        Self { mime_table }
    }

    /// Why a candidate is excluded, or `None` if it is accepted
    pub fn rejection(&self, candidate: &CandidateFile) -> Option<Rejection> {
        if is_hidden(&candidate.relative_path) {
            return Some(Rejection::Hidden);
        }

        if self.mime_table.is_binary(&candidate.relative_path) {
            return Some(Rejection::Binary);
        }

        None
    }
}

/// Default table, built once from [`DEFAULT_MIME_TYPES`]
static DEFAULT_TABLE: Lazy<MimeTable> =
    Lazy::new(|| DEFAULT_MIME_TYPES.iter().copied().collect());

/// Pinned extension table, so results don't depend on the host's MIME database
pub const DEFAULT_MIME_TYPES: &[(&str, &str)] = &[
    // Text
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("bat", "text/plain"),
    ("c", "text/plain"),
    ("h", "text/plain"),
    ("ksh", "text/plain"),
    ("pl", "text/plain"),
    ("srt", "text/plain"),
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("tsv", "text/tab-separated-values"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("md", "text/markdown"),
    ("markdown", "text/markdown"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("py", "text/x-python"),
    ("xml", "text/xml"),
    ("rtf", "text/rtf"),
    ("rtx", "text/richtext"),
    ("vtt", "text/vtt"),
    ("ics", "text/calendar"),
    ("vcf", "text/x-vcard"),
    ("etx", "text/x-setext"),
    ("sgm", "text/x-sgml"),
    ("sgml", "text/x-sgml"),
    // Application documents and scripts
    ("json", "application/json"),
    ("webmanifest", "application/manifest+json"),
    ("xsl", "application/xml"),
    ("rdf", "application/xml"),
    ("wsdl", "application/xml"),
    ("sh", "application/x-sh"),
    ("csh", "application/x-csh"),
    ("tex", "application/x-tex"),
    ("latex", "application/x-latex"),
    ("texi", "application/x-texinfo"),
    ("texinfo", "application/x-texinfo"),
    ("pdf", "application/pdf"),
    ("ps", "application/postscript"),
    ("eps", "application/postscript"),
    ("ai", "application/postscript"),
    ("doc", "application/msword"),
    ("dot", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    // Executables and compiled artifacts
    ("bin", "application/octet-stream"),
    ("exe", "application/octet-stream"),
    ("dll", "application/octet-stream"),
    ("so", "application/octet-stream"),
    ("o", "application/octet-stream"),
    ("obj", "application/octet-stream"),
    ("a", "application/octet-stream"),
    ("wasm", "application/wasm"),
    ("pyc", "application/x-python-code"),
    ("pyo", "application/x-python-code"),
    ("class", "application/java-vm"),
    ("jar", "application/java-archive"),
    ("swf", "application/x-shockwave-flash"),
    ("p12", "application/x-pkcs12"),
    ("pfx", "application/x-pkcs12"),
    ("nc", "application/x-netcdf"),
    ("cdf", "application/x-netcdf"),
    // Archives
    ("zip", "application/zip"),
    ("tar", "application/x-tar"),
    ("gz", "application/gzip"),
    ("tgz", "application/gzip"),
    ("bz2", "application/x-bzip2"),
    ("xz", "application/x-xz"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("ico", "image/vnd.microsoft.icon"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/x-wav"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("opus", "audio/opus"),
    // Video
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    // Fonts
    ("otf", "font/otf"),
    ("ttf", "font/ttf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
];
