//! Removal of fragments that overlap a more specific fragment.

use indexmap::IndexSet;

/// Drop every fragment that contains a distinct other fragment of the set.
///
/// A container's text subsumes the text of its descendants, so only the
/// innermost fragment is kept. Fragments that differ only in leading or
/// trailing whitespace are one text; its first occurrence is kept. The test
/// is a plain substring check, not aware of word boundaries or DOM nesting.
/// Relative order is preserved.
pub fn reduce_duplicates(fragments: &IndexSet<String>) -> Vec<String> {
    let mut distinct: Vec<&String> = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        if !distinct.iter().any(|seen| seen.trim() == fragment.trim()) {
            distinct.push(fragment);
        }
    }

    distinct
        .iter()
        .filter(|fragment| {
            !fragments.iter().any(|other| {
                other.trim() != fragment.trim() && fragment.contains(other.trim())
            })
        })
        .map(|fragment| fragment.to_string())
        .collect()
}
