//! Error types for pdfoutline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading spans or writing outlines.
///
/// The classification core never fails; every variant here comes from the
/// span source, the renderer, or the batch driver around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text spans from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A serialized span dump could not be read.
    #[error("Invalid span dump: {0}")]
    SpanDump(#[from] serde_json::Error),

    /// Error while rendering an outline.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Two batch inputs map to the same output file.
    #[error("Output {} is already written by {}", .output.display(), .claimed_by.display())]
    OutputConflict {
        /// The contested output path
        output: PathBuf,
        /// The earlier input that owns it
        claimed_by: PathBuf,
    },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
