//! Form-like layout detection.
//!
//! Forms, applications and checklists are dominated by short labels and
//! field fragments. On such documents single-word fragments must not turn
//! into headings, so the evaluator gets stricter once this detector fires.

use super::options::OutlineOptions;
use super::text::TextStats;
use crate::model::Document;

/// Decide whether the leading pages of `doc` look like a form.
pub fn is_form_like(doc: &Document, options: &OutlineOptions) -> bool {
    let sample = doc
        .pages
        .iter()
        .take(options.form_sample_pages)
        .flat_map(|page| page.spans.iter())
        .map(|span| span.text.as_str())
        .filter(|text| !text.is_empty());

    let (fragments, total) = sample.fold((0usize, 0usize), |(fragments, total), text| {
        let is_fragment = is_form_fragment(text, options);
        (fragments + usize::from(is_fragment), total + 1)
    });

    if total == 0 {
        return false;
    }

    let share = fragments as f32 / total as f32;
    let form_like = share > options.form_ratio;
    log::debug!(
        "Form-like check: {}/{} fragments ({:.2}) -> {}",
        fragments,
        total,
        share,
        form_like
    );
    form_like
}

/// A short symbol-dense piece of text, or a short all-caps label.
fn is_form_fragment(text: &str, options: &OutlineOptions) -> bool {
    let stats = TextStats::of(text);

    let short_and_dense =
        stats.len < options.form_short_len && stats.symbol_ratio() >= options.form_symbol_density;
    let short_caps = stats.is_fully_uppercase() && stats.len < options.form_caps_len;

    short_and_dense || short_caps
}
