//! PDF header detection.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Header information read from the first bytes of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read and check the header of a PDF file.
pub fn detect_pdf_file<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(16);
    BufReader::new(file).take(16).read_to_end(&mut header)?;
    detect_pdf_header(&header)
}

/// Check that `data` starts with a `%PDF-x.y` header.
pub fn detect_pdf_header(data: &[u8]) -> Result<PdfHeader> {
    let Some(rest) = data.strip_prefix(PDF_MAGIC) else {
        return Err(Error::UnknownFormat);
    };
    let Some(version_bytes) = rest.get(..VERSION_LEN) else {
        return Err(Error::UnknownFormat);
    };

    let version = String::from_utf8_lossy(version_bytes).to_string();
    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfHeader { version })
        }
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Check if a file looks like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_pdf_file(path).is_ok()
}
