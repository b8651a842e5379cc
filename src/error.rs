//! Error type for the sitefix library.
//!
//! Every procedure is a one-shot transformation, so there is a single fatal
//! error type, [`SiteFixError`]. A procedure either finishes and returns its
//! report or returns one of these. Nothing is retried, and the text
//! procedures never write a partial result: output is validated in memory
//! before it touches disk.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the sitefix library.
#[derive(Debug, Error)]
pub enum SiteFixError {
    // ── File errors ───────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck --root points at the site checkout.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading an input.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Locale repair ─────────────────────────────────────────────────────
    /// A literal marker the splice depends on is absent.
    #[error("Could not find {what} in '{path}'\nMarker: {marker:?}")]
    MarkerNotFound {
        path: PathBuf,
        what: &'static str,
        marker: String,
    },

    /// The spliced document does not parse.
    #[error("Repaired JSON is invalid at line {line}, column {column}: {detail}\nNothing was written.")]
    InvalidJson {
        line: usize,
        column: usize,
        detail: String,
    },

    /// The spliced document still carries the duplicated section.
    #[error("Expected exactly one {anchor:?} after repair, found {found}\nNothing was written.")]
    DuplicateSection { anchor: String, found: usize },

    // ── Markup surgery ────────────────────────────────────────────────────
    /// An edit pattern failed to compile.
    #[error("Edit '{label}' has an invalid pattern: {detail}")]
    InvalidRegex { label: String, detail: String },

    /// Strict mode: an edit matched nothing.
    #[error("Edit '{label}' matched nothing in '{path}'\nThe file has probably drifted from the revision the plan was written for.")]
    EditDidNotMatch { label: String, path: PathBuf },

    /// A plan file could not be read or parsed.
    #[error("Invalid edit plan '{path}': {detail}")]
    InvalidPlan { path: PathBuf, detail: String },

    // ── Line reordering ───────────────────────────────────────────────────
    /// A line range is malformed or overlaps its destination.
    #[error("Invalid line range: {0}")]
    InvalidRange(String),

    /// A line number exceeds the file length.
    #[error("Line {line} is out of range (file has {total} lines)")]
    LineOutOfRange { line: usize, total: usize },

    // ── Image rendering ───────────────────────────────────────────────────
    /// A required image asset is missing.
    #[error("Asset not found: '{path}'")]
    AssetNotFound { path: PathBuf },

    /// An asset exists but could not be decoded.
    #[error("Failed to decode image '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// PNG encoding failed.
    #[error("Failed to encode PNG '{path}': {source}")]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A font file exists but is not a usable outline font.
    #[error("Failed to load font '{path}': {detail}")]
    FontLoad { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SiteFixError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => SiteFixError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => SiteFixError::PermissionDenied { path },
            _ => SiteFixError::ReadFailed { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let e = SiteFixError::from_read(
            "missing.json",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(e, SiteFixError::FileNotFound { .. }));
        assert!(e.to_string().contains("missing.json"));
    }

    #[test]
    fn other_io_errors_keep_source() {
        let e = SiteFixError::from_read(
            "a.json",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes"),
        );
        assert!(matches!(e, SiteFixError::ReadFailed { .. }));
        assert!(e.to_string().contains("bad bytes"));
    }

    #[test]
    fn duplicate_section_display() {
        let e = SiteFixError::DuplicateSection {
            anchor: "\"auth\": {".into(),
            found: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("found 2"), "got: {msg}");
        assert!(msg.contains("Nothing was written"));
    }

    #[test]
    fn line_out_of_range_display() {
        let e = SiteFixError::LineOutOfRange {
            line: 731,
            total: 500,
        };
        assert!(e.to_string().contains("731"));
        assert!(e.to_string().contains("500 lines"));
    }
}
