//! Error types for the docx2journal library.
//!
//! One error enum covers the whole pipeline because every failure here is
//! fatal to the run that raised it: a rejected input, an undecodable
//! document, or a layout run that cannot produce a file. There is no
//! per-item partial-failure mode — **extraction degradation is not an
//! error**. When a heuristic finds nothing (no abstract, zero sections),
//! the field takes its fallback value and the record stays valid; callers
//! see the shortfall in [`crate::manuscript::StructureSummary`], not in a
//! `Result`.
//!
//! Failed runs leave no partial state behind: a rejected upload does not
//! touch the session record, and a failed layout run offers no bytes.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the docx2journal library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input rejection ───────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Manuscript file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file does not carry the accepted extension.
    #[error("Unsupported file type: '{path}'\nOnly Word manuscripts (.docx) are accepted.")]
    UnsupportedExtension { path: PathBuf },

    /// The file exceeds the configured size gate.
    #[error(
        "File is too large: {size} bytes (limit {limit} bytes)\n\
         Raise the limit with --max-size-mb if the manuscript is legitimate."
    )]
    FileTooLarge { size: u64, limit: u64 },

    /// The file exists and was read, but is not a ZIP container at all.
    /// A .docx always starts with the ZIP local-file-header magic `PK`.
    #[error("File is not a valid .docx archive: '{path}'\nFirst bytes: {magic:?}")]
    NotADocx { path: PathBuf, magic: [u8; 4] },

    // ── Conversion failure ────────────────────────────────────────────────
    /// The archive opened but the document inside cannot be decoded
    /// (missing `word/document.xml`, truncated entry, malformed XML).
    #[error("Cannot decode Word document: {reason}\nThe file may be corrupt or saved in an unsupported format.")]
    DocxDecode { reason: String },

    // ── Rendering failure ─────────────────────────────────────────────────
    /// Page geometry rejected before any drawing happened.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The layout run failed as a whole; no partial PDF is offered.
    #[error("PDF generation failed: {reason}")]
    RenderFailed { reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failure while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_display_names_both_sizes() {
        let e = ConvertError::FileTooLarge {
            size: 11_000_000,
            limit: 10_485_760,
        };
        let msg = e.to_string();
        assert!(msg.contains("11000000"), "got: {msg}");
        assert!(msg.contains("10485760"), "got: {msg}");
    }

    #[test]
    fn unsupported_extension_display() {
        let e = ConvertError::UnsupportedExtension {
            path: PathBuf::from("paper.pdf"),
        };
        assert!(e.to_string().contains("paper.pdf"));
        assert!(e.to_string().contains(".docx"));
    }

    #[test]
    fn not_a_docx_shows_magic() {
        let e = ConvertError::NotADocx {
            path: PathBuf::from("fake.docx"),
            magic: [0x25, 0x50, 0x44, 0x46],
        };
        assert!(e.to_string().contains("fake.docx"));
        assert!(e.to_string().contains("37")); // 0x25 in Debug output
    }

    #[test]
    fn decode_failure_carries_reason() {
        let e = ConvertError::DocxDecode {
            reason: "missing word/document.xml".into(),
        };
        assert!(e.to_string().contains("word/document.xml"));
    }
}
