//! Document model types for outline extraction.
//!
//! Two layers live here: the raw span records a PDF text layer hands over
//! ([`RawSpan`], [`RawPage`]), and the normalized, immutable records the
//! classifier works on ([`TextSpan`], [`Page`], [`Document`]). The result
//! types ([`HeadingLevel`], [`HeadingCandidate`], [`Outline`]) are what the
//! renderer serializes.

mod document;
mod outline;

pub use document::{Document, Page, RawPage, RawSpan, TextSpan};
pub use outline::{HeadingCandidate, HeadingLevel, Outline};
