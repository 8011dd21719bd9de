//! Title selection from the first page.

use super::options::OutlineOptions;
use super::text::TextStats;
use crate::model::{Page, TextSpan};

/// Pick the document title from the first page, or "" when nothing fits.
///
/// Tried in order:
/// 1. qualifying spans in the top band, largest font first
/// 2. qualifying spans in the wider fallback band, longest text first
/// 3. the first span on the page with enough text
///
/// Ties keep the earliest span.
pub fn select_title(first_page: Option<&Page>, options: &OutlineOptions) -> String {
    let Some(page) = first_page else {
        return String::new();
    };

    let qualifying = |band: f32| {
        page.spans
            .iter()
            .filter(move |span| span.relative_y < band && qualifies(span, options))
    };

    let primary = qualifying(options.title_band).fold(None, |best: Option<&TextSpan>, span| {
        match best {
            Some(b) if b.font_size >= span.font_size => Some(b),
            _ => Some(span),
        }
    });
    if let Some(span) = primary {
        log::debug!("Title from top band: {:?}", span.text);
        return span.text.clone();
    }

    let fallback =
        qualifying(options.title_fallback_band).fold(None, |best: Option<&TextSpan>, span| {
            match best {
                Some(b) if b.char_len() >= span.char_len() => Some(b),
                _ => Some(span),
            }
        });
    if let Some(span) = fallback {
        log::debug!("Title from fallback band: {:?}", span.text);
        return span.text.clone();
    }

    page.spans
        .iter()
        .find(|span| span.char_len() > options.title_fallback_min_len)
        .map(|span| span.text.clone())
        .unwrap_or_default()
}

fn qualifies(span: &TextSpan, options: &OutlineOptions) -> bool {
    let text = span.text.as_str();
    !TextStats::of(text).is_fully_uppercase()
        && !text.ends_with('.')
        && !text.ends_with(':')
        && span.char_len() > options.title_min_len
}
