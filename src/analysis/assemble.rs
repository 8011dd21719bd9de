//! Final outline assembly.

use std::collections::HashSet;

use crate::model::{HeadingCandidate, Outline};

/// Build the outline from candidates in document order.
///
/// The first occurrence of each (text, page) pair is kept. Entries whose
/// text equals a non-empty title are dropped.
pub fn assemble<I>(title: String, candidates: I) -> Outline
where
    I: IntoIterator<Item = HeadingCandidate>,
{
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    let mut outline = Outline::new(title);

    for candidate in candidates {
        if !outline.title.is_empty() && candidate.text == outline.title {
            continue;
        }
        if !seen.insert((candidate.text.clone(), candidate.page)) {
            continue;
        }
        outline.entries.push(candidate);
    }

    outline
}
