//! Rendering module for writing outlines and span dumps.

mod json;

pub use json::{spans_to_json, to_json, write_json, JsonFormat};
