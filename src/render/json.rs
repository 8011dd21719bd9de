//! JSON rendering for outlines and span dumps.

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Outline, RawPage};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Non-ASCII text is written as-is, not as `\u` escapes.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Convert raw pages to a JSON span dump.
pub fn spans_to_json(pages: &[RawPage], format: JsonFormat) -> Result<String> {
    serialize(pages, format)
}

/// Write an outline as JSON to `writer`, followed by a newline.
pub fn write_json<W: Write>(outline: &Outline, format: JsonFormat, mut writer: W) -> Result<()> {
    let json = to_json(outline, format)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
